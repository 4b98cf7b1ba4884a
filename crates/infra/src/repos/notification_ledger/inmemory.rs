use super::INotificationLedgerRepo;
use crate::repos::shared::inmemory_repo::lock;
use birthday_greetings_domain::{NaiveDate, UserId};
use std::collections::HashSet;
use std::sync::Mutex;

pub struct InMemoryNotificationLedgerRepo {
    entries: Mutex<HashSet<(UserId, NaiveDate)>>,
}

impl InMemoryNotificationLedgerRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationLedgerRepo for InMemoryNotificationLedgerRepo {
    async fn claim(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<bool> {
        Ok(lock(&self.entries).insert((user_id, date)))
    }

    async fn release(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<()> {
        lock(&self.entries).remove(&(user_id, date));
        Ok(())
    }

    async fn is_notified(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<bool> {
        Ok(lock(&self.entries).contains(&(user_id, date)))
    }

    async fn delete_all_before(&self, date: NaiveDate) -> anyhow::Result<u64> {
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|(_, notified_on)| *notified_on >= date);
        Ok((before - entries.len()) as u64)
    }
}
