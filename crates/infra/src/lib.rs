mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{INotificationLedgerRepo, INotificationRepo, IProfileRepo, Repos};
use std::sync::Arc;
pub use system::{FixedSys, ISys};
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct BirthdayContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl BirthdayContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(&params.postgres_connection_string).await?;
        Ok(Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment.
/// Falls back to inmemory repositories when no database is configured.
pub async fn setup_context() -> anyhow::Result<BirthdayContext> {
    match get_psql_connection_string() {
        Some(postgres_connection_string) => {
            BirthdayContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        None => {
            info!("Did not find DATABASE_URL environment variable. Going to use inmemory repositories.");
            Ok(BirthdayContext::create_inmemory())
        }
    }
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .ok()
        .filter(|s| !s.trim().is_empty())
}
