use crate::shared::entity::{Entity, ID};

/// A service offered by a `Shop`, e.g. a haircut or a beard trim
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: ID,
    pub shop_id: ID,
    pub name: String,
}

impl Service {
    pub fn new(shop_id: ID, name: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            shop_id,
            name: name.into(),
        }
    }
}

impl Entity for Service {
    fn id(&self) -> &ID {
        &self.id
    }
}
