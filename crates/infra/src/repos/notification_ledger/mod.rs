mod inmemory;
mod postgres;

use birthday_greetings_domain::{NaiveDate, UserId};
pub use inmemory::InMemoryNotificationLedgerRepo;
pub use postgres::PostgresNotificationLedgerRepo;

/// Remembers which members got their birthday notification on which day,
/// so that the daily scan can run any number of times without notifying
/// anyone twice.
#[async_trait::async_trait]
pub trait INotificationLedgerRepo: Send + Sync {
    /// Marks `user_id` as notified on `date` unless it already is.
    /// Returns `true` only for the caller that created the entry, also when
    /// several callers race for the same key.
    async fn claim(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<bool>;
    /// Removes an entry created by `claim`, used when the notification
    /// could not be delivered after all.
    async fn release(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<()>;
    async fn is_notified(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<bool>;
    /// Deletes every entry dated before `date` and returns how many were deleted
    async fn delete_all_before(&self, date: NaiveDate) -> anyhow::Result<u64>;
}
