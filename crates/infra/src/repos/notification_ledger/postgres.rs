use super::INotificationLedgerRepo;
use birthday_greetings_domain::{NaiveDate, UserId};
use sqlx::PgPool;

pub struct PostgresNotificationLedgerRepo {
    pool: PgPool,
}

impl PostgresNotificationLedgerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl INotificationLedgerRepo for PostgresNotificationLedgerRepo {
    async fn claim(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<bool> {
        // The primary key makes the insert the check-and-set
        let res = sqlx::query(
            r#"
            INSERT INTO birthday_notification_ledger(user_id, notified_on)
            VALUES($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id.inner())
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn release(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM birthday_notification_ledger
            WHERE user_id = $1 AND notified_on = $2
            "#,
        )
        .bind(user_id.inner())
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_notified(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT l.user_id FROM birthday_notification_ledger AS l
            WHERE l.user_id = $1 AND l.notified_on = $2
            "#,
        )
        .bind(user_id.inner())
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn delete_all_before(&self, date: NaiveDate) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM birthday_notification_ledger AS l
            WHERE l.notified_on < $1
            "#,
        )
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}
