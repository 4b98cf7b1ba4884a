use super::INotificationRepo;
use birthday_greetings_domain::{NotificationEvent, UserId};
use sqlx::{FromRow, PgPool};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    user_id: i64,
    item_id: i64,
    component_name: String,
    component_action: String,
    date_notified: i64,
    is_new: bool,
}

impl From<NotificationRaw> for NotificationEvent {
    fn from(raw: NotificationRaw) -> Self {
        Self {
            user_id: UserId::new(raw.user_id),
            item_id: UserId::new(raw.item_id),
            component: raw.component_name,
            action: raw.component_action,
            timestamp: raw.date_notified,
            is_new: raw.is_new,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn accept(&self, event: &NotificationEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (user_id, item_id, component_name, component_action, date_notified, is_new)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event.user_id.inner())
        .bind(event.item_id.inner())
        .bind(&event.component)
        .bind(&event.action)
        .bind(event.timestamp)
        .bind(event.is_new)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> anyhow::Result<Vec<NotificationEvent>> {
        let notifications: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT n.user_id, n.item_id, n.component_name, n.component_action, n.date_notified, n.is_new
            FROM notifications AS n
            WHERE n.user_id = $1
            ORDER BY n.id
            "#,
        )
        .bind(user_id.inner())
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications.into_iter().map(|n| n.into()).collect())
    }
}
