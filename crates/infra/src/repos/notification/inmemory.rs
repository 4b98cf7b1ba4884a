use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use birthday_greetings_domain::{NotificationEvent, UserId};
use std::sync::Mutex;

pub struct InMemoryNotificationRepo {
    notifications: Mutex<Vec<NotificationEvent>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn accept(&self, event: &NotificationEvent) -> anyhow::Result<()> {
        insert(event, &self.notifications);
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> anyhow::Result<Vec<NotificationEvent>> {
        Ok(find_by(&self.notifications, |n| n.user_id == user_id))
    }
}
