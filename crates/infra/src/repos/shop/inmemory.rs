use super::IShopRepo;
use crate::repos::shared::inmemory_repo::*;
use cuthub_domain::{Shop, ID};

pub struct InMemoryShopRepo {
    shops: std::sync::Mutex<Vec<Shop>>,
}

impl InMemoryShopRepo {
    pub fn new() -> Self {
        Self {
            shops: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IShopRepo for InMemoryShopRepo {
    async fn insert(&self, shop: &Shop) -> anyhow::Result<()> {
        insert(shop, &self.shops);
        Ok(())
    }

    async fn find_many(&self, shop_ids: &[ID]) -> anyhow::Result<Vec<Shop>> {
        Ok(find_many(shop_ids, &self.shops))
    }
}
