use super::ILocationRepo;
use crate::repos::shared::inmemory_repo::*;
use cuthub_domain::{Location, ID};

pub struct InMemoryLocationRepo {
    locations: std::sync::Mutex<Vec<Location>>,
}

impl InMemoryLocationRepo {
    pub fn new() -> Self {
        Self {
            locations: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ILocationRepo for InMemoryLocationRepo {
    async fn insert(&self, location: &Location) -> anyhow::Result<()> {
        insert(location, &self.locations);
        Ok(())
    }

    async fn find_many(&self, location_ids: &[ID]) -> anyhow::Result<Vec<Location>> {
        Ok(find_many(location_ids, &self.locations))
    }
}
