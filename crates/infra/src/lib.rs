mod config;
mod repos;
mod services;
mod system;

use anyhow::Context;
pub use config::{Config, EmailConfig};
pub use repos::{IAppointmentRepo, ILocationRepo, IServiceRepo, IShopRepo, IUserRepo, Repos};
pub use services::*;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

/// Everything a use case needs to talk to the outside world.
/// Created once at startup and shared by all requests and jobs.
#[derive(Clone)]
pub struct CutHubContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn IReminderNotifier>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl CutHubContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&params.postgres_connection_string)
            .await
            .context("Unable to connect to postgres")?;

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!()
            .run(&pool)
            .await
            .context("Unable to run the database migrations")?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        let config = Config::new();
        let notifier = Arc::new(ResendReminderNotifier::new(&config.email));
        Ok(Self {
            repos: Repos::create_postgres(pool),
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        })
    }

    /// Context without any external dependencies, useful for testing
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(InMemoryReminderNotifier::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<CutHubContext> {
    CutHubContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string()?,
    })
    .await
}

fn get_psql_connection_string() -> anyhow::Result<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .with_context(|| format!("{} env var to be present.", PSQL_CONNECTION_STRING))
}
