use super::IProfileRepo;
use birthday_greetings_domain::{
    BirthRecord, Member, ProfileFieldValue, RawBirthValue, UserId,
};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

pub struct PostgresProfileRepo {
    pool: PgPool,
}

impl PostgresProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BirthValueRaw {
    user_id: i64,
    value: String,
}

#[derive(Debug, FromRow)]
struct DisplayNameRaw {
    user_id: i64,
    display_name: String,
}

impl BirthValueRaw {
    fn into_record(self, tz_offset_seconds: i64) -> BirthRecord {
        BirthRecord {
            user_id: UserId::new(self.user_id),
            raw_value: RawBirthValue::from_stored(&self.value),
            tz_offset_seconds,
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for PostgresProfileRepo {
    async fn insert_member(&self, member: &Member) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_id, display_name, user_status)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(member.id.inner())
        .bind(&member.display_name)
        .bind(member.status.to_stored())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_field_value(&self, value: &ProfileFieldValue) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profile_data(field_id, user_id, value)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(value.field_id)
        .bind(value.user_id.inner())
        .bind(&value.value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_birth_records(
        &self,
        field_id: i64,
        tz_offset_seconds: i64,
    ) -> anyhow::Result<Vec<BirthRecord>> {
        let values: Vec<BirthValueRaw> = sqlx::query_as(
            r#"
            SELECT profile.user_id, profile.value FROM profile_data AS profile
            INNER JOIN users ON profile.user_id = users.user_id AND users.user_status != 1
            WHERE profile.field_id = $1
            ORDER BY profile.id
            "#,
        )
        .bind(field_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(values
            .into_iter()
            .map(|v| v.into_record(tz_offset_seconds))
            .collect())
    }

    async fn find_display_names(
        &self,
        user_ids: &[UserId],
    ) -> anyhow::Result<HashMap<UserId, String>> {
        let ids = user_ids.iter().map(|id| id.inner()).collect::<Vec<_>>();
        let names: Vec<DisplayNameRaw> = sqlx::query_as(
            r#"
            SELECT u.user_id, u.display_name FROM users AS u
            WHERE u.user_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(names
            .into_iter()
            .map(|n| (UserId::new(n.user_id), n.display_name))
            .collect())
    }
}
