use crate::shared::entity::{Entity, ID};

/// Clients and professionals share the same `User` collection
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email,
        }
    }

    /// The address reminders should be delivered to, if the user has a usable one
    pub fn reminder_address(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
