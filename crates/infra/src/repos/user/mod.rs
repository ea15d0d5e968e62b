mod inmemory;
mod postgres;

use cuthub_domain::{User, ID};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    /// Ids without a matching `User` are left out of the result
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>>;
}
