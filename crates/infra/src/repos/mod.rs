mod appointment;
mod location;
mod service;
mod shared;
mod shop;
mod user;

pub use appointment::IAppointmentRepo;
use appointment::{InMemoryAppointmentRepo, PostgresAppointmentRepo};
pub use location::ILocationRepo;
use location::{InMemoryLocationRepo, PostgresLocationRepo};
pub use service::IServiceRepo;
use service::{InMemoryServiceRepo, PostgresServiceRepo};
pub use shop::IShopRepo;
use shop::{InMemoryShopRepo, PostgresShopRepo};
use sqlx::PgPool;
use std::sync::Arc;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub appointments: Arc<dyn IAppointmentRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub services: Arc<dyn IServiceRepo>,
    pub shops: Arc<dyn IShopRepo>,
    pub locations: Arc<dyn ILocationRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            appointments: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            services: Arc::new(PostgresServiceRepo::new(pool.clone())),
            shops: Arc::new(PostgresShopRepo::new(pool.clone())),
            locations: Arc::new(PostgresLocationRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            services: Arc::new(InMemoryServiceRepo::new()),
            shops: Arc::new(InMemoryShopRepo::new()),
            locations: Arc::new(InMemoryLocationRepo::new()),
        }
    }
}
