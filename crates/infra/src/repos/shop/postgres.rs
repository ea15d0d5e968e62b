use super::IShopRepo;
use crate::repos::shared::postgres_repo::to_uuids;
use cuthub_domain::{Shop, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresShopRepo {
    pool: PgPool,
}

impl PostgresShopRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ShopRaw {
    shop_uid: Uuid,
    name: String,
    slug: String,
}

impl From<ShopRaw> for Shop {
    fn from(raw: ShopRaw) -> Self {
        Self {
            id: raw.shop_uid.into(),
            name: raw.name,
            slug: raw.slug,
        }
    }
}

#[async_trait::async_trait]
impl IShopRepo for PostgresShopRepo {
    async fn insert(&self, shop: &Shop) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO shops(shop_uid, name, slug)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(shop.id.inner_ref())
        .bind(&shop.name)
        .bind(&shop.slug)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_many(&self, shop_ids: &[ID]) -> anyhow::Result<Vec<Shop>> {
        let shops = sqlx::query_as::<_, ShopRaw>(
            r#"
            SELECT * FROM shops AS s
            WHERE s.shop_uid = ANY($1)
            "#,
        )
        .bind(to_uuids(shop_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(shops.into_iter().map(|s| s.into()).collect())
    }
}
