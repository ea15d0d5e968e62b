mod inmemory;
mod postgres;

use cuthub_domain::{Location, ID};
pub use inmemory::InMemoryLocationRepo;
pub use postgres::PostgresLocationRepo;

#[async_trait::async_trait]
pub trait ILocationRepo: Send + Sync {
    async fn insert(&self, location: &Location) -> anyhow::Result<()>;
    /// Ids without a matching `Location` are left out of the result
    async fn find_many(&self, location_ids: &[ID]) -> anyhow::Result<Vec<Location>>;
}
