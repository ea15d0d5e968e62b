mod inmemory;
mod postgres;

use cuthub_domain::{Shop, ID};
pub use inmemory::InMemoryShopRepo;
pub use postgres::PostgresShopRepo;

#[async_trait::async_trait]
pub trait IShopRepo: Send + Sync {
    async fn insert(&self, shop: &Shop) -> anyhow::Result<()>;
    /// Ids without a matching `Shop` are left out of the result
    async fn find_many(&self, shop_ids: &[ID]) -> anyhow::Result<Vec<Shop>>;
}
