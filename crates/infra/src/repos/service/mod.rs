mod inmemory;
mod postgres;

use cuthub_domain::{Service, ID};
pub use inmemory::InMemoryServiceRepo;
pub use postgres::PostgresServiceRepo;

#[async_trait::async_trait]
pub trait IServiceRepo: Send + Sync {
    async fn insert(&self, service: &Service) -> anyhow::Result<()>;
    /// Ids without a matching `Service` are left out of the result
    async fn find_many(&self, service_ids: &[ID]) -> anyhow::Result<Vec<Service>>;
}
