mod inmemory;
mod postgres;

use birthday_greetings_domain::{NotificationEvent, UserId};
pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;

/// Where notifications end up, the platform takes care of showing them
#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    /// Hands the notification over. An error means it was not stored.
    async fn accept(&self, event: &NotificationEvent) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: UserId) -> anyhow::Result<Vec<NotificationEvent>>;
}
