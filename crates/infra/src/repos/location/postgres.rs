use super::ILocationRepo;
use crate::repos::shared::postgres_repo::to_uuids;
use cuthub_domain::{Location, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresLocationRepo {
    pool: PgPool,
}

impl PostgresLocationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LocationRaw {
    location_uid: Uuid,
    shop_uid: Uuid,
    name: String,
    address: Option<String>,
}

impl From<LocationRaw> for Location {
    fn from(raw: LocationRaw) -> Self {
        Self {
            id: raw.location_uid.into(),
            shop_id: raw.shop_uid.into(),
            name: raw.name,
            address: raw.address,
        }
    }
}

#[async_trait::async_trait]
impl ILocationRepo for PostgresLocationRepo {
    async fn insert(&self, location: &Location) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO locations(location_uid, shop_uid, name, address)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(location.id.inner_ref())
        .bind(location.shop_id.inner_ref())
        .bind(&location.name)
        .bind(&location.address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_many(&self, location_ids: &[ID]) -> anyhow::Result<Vec<Location>> {
        let locations = sqlx::query_as::<_, LocationRaw>(
            r#"
            SELECT * FROM locations AS l
            WHERE l.location_uid = ANY($1)
            "#,
        )
        .bind(to_uuids(location_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(locations.into_iter().map(|l| l.into()).collect())
    }
}
