mod notification;
mod notification_ledger;
mod profile;
mod shared;

pub use notification::INotificationRepo;
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
pub use notification_ledger::INotificationLedgerRepo;
use notification_ledger::{InMemoryNotificationLedgerRepo, PostgresNotificationLedgerRepo};
pub use profile::IProfileRepo;
use profile::{InMemoryProfileRepo, PostgresProfileRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub profiles: Arc<dyn IProfileRepo>,
    pub notification_ledger: Arc<dyn INotificationLedgerRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            profiles: Arc::new(PostgresProfileRepo::new(pool.clone())),
            notification_ledger: Arc::new(PostgresNotificationLedgerRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            profiles: Arc::new(InMemoryProfileRepo::new()),
            notification_ledger: Arc::new(InMemoryNotificationLedgerRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
        }
    }
}
