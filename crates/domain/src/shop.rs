use crate::shared::entity::{Entity, ID};

/// A barbershop tenant
#[derive(Debug, Clone, PartialEq)]
pub struct Shop {
    pub id: ID,
    pub name: String,
    pub slug: String,
}

impl Shop {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

impl Entity for Shop {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// One of the physical addresses of a `Shop`
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: ID,
    pub shop_id: ID,
    pub name: String,
    pub address: Option<String>,
}

impl Location {
    pub fn new(shop_id: ID, name: impl Into<String>, address: Option<String>) -> Self {
        Self {
            id: Default::default(),
            shop_id,
            name: name.into(),
            address,
        }
    }
}

impl Entity for Location {
    fn id(&self) -> &ID {
        &self.id
    }
}
