use super::IServiceRepo;
use crate::repos::shared::postgres_repo::to_uuids;
use cuthub_domain::{Service, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresServiceRepo {
    pool: PgPool,
}

impl PostgresServiceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ServiceRaw {
    service_uid: Uuid,
    shop_uid: Uuid,
    name: String,
}

impl From<ServiceRaw> for Service {
    fn from(raw: ServiceRaw) -> Self {
        Self {
            id: raw.service_uid.into(),
            shop_id: raw.shop_uid.into(),
            name: raw.name,
        }
    }
}

#[async_trait::async_trait]
impl IServiceRepo for PostgresServiceRepo {
    async fn insert(&self, service: &Service) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO services(service_uid, shop_uid, name)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(service.id.inner_ref())
        .bind(service.shop_id.inner_ref())
        .bind(&service.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_many(&self, service_ids: &[ID]) -> anyhow::Result<Vec<Service>> {
        let services = sqlx::query_as::<_, ServiceRaw>(
            r#"
            SELECT * FROM services AS s
            WHERE s.service_uid = ANY($1)
            "#,
        )
        .bind(to_uuids(service_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(services.into_iter().map(|s| s.into()).collect())
    }
}
