mod inmemory;
mod postgres;

use birthday_greetings_domain::{BirthRecord, Member, ProfileFieldValue, UserId};
pub use inmemory::InMemoryProfileRepo;
pub use postgres::PostgresProfileRepo;
use std::collections::HashMap;

/// The membership directory and the profile fields of its members
#[async_trait::async_trait]
pub trait IProfileRepo: Send + Sync {
    async fn insert_member(&self, member: &Member) -> anyhow::Result<()>;
    async fn insert_field_value(&self, value: &ProfileFieldValue) -> anyhow::Result<()>;
    /// Values stored in `field_id` by active members, in insertion order.
    /// Every record carries `tz_offset_seconds`.
    async fn fetch_birth_records(
        &self,
        field_id: i64,
        tz_offset_seconds: i64,
    ) -> anyhow::Result<Vec<BirthRecord>>;
    async fn find_display_names(
        &self,
        user_ids: &[UserId],
    ) -> anyhow::Result<HashMap<UserId, String>>;
}

#[cfg(test)]
mod tests {
    use crate::BirthdayContext;
    use birthday_greetings_domain::{
        Member, MemberStatus, ProfileFieldValue, RawBirthValue, UserId,
    };

    fn field_value(field_id: i64, user_id: i64, value: &str) -> ProfileFieldValue {
        ProfileFieldValue {
            field_id,
            user_id: UserId::new(user_id),
            value: value.into(),
        }
    }

    #[tokio::test]
    async fn fetches_birth_records_of_active_members() {
        let ctx = BirthdayContext::create_inmemory();
        let profiles = &ctx.repos.profiles;

        let mut disabled = Member::new(UserId::new(3), "Carol");
        disabled.status = MemberStatus::Disabled;
        for member in &[
            Member::new(UserId::new(1), "Alice"),
            Member::new(UserId::new(2), "Bob"),
            disabled,
        ] {
            profiles.insert_member(member).await.expect("To insert member");
        }

        for value in &[
            field_value(1, 2, "637459200"),
            field_value(1, 1, "1990-03-15"),
            field_value(1, 3, "1991-03-15"),
            // Other profile field
            field_value(2, 1, "Oslo"),
            // Value without a member
            field_value(1, 4, "1992-03-15"),
        ] {
            profiles
                .insert_field_value(value)
                .await
                .expect("To insert field value");
        }

        let records = profiles
            .fetch_birth_records(1, 3600)
            .await
            .expect("To fetch birth records");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].user_id, UserId::new(2));
        assert_eq!(records[0].raw_value, RawBirthValue::Timestamp(637459200));
        assert_eq!(records[1].user_id, UserId::new(1));
        assert_eq!(records[1].raw_value, RawBirthValue::Text("1990-03-15".into()));
        assert!(records.iter().all(|r| r.tz_offset_seconds == 3600));

        let records = profiles
            .fetch_birth_records(99, 0)
            .await
            .expect("To fetch birth records");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn finds_display_names() {
        let ctx = BirthdayContext::create_inmemory();
        let profiles = &ctx.repos.profiles;
        profiles
            .insert_member(&Member::new(UserId::new(1), "Alice"))
            .await
            .expect("To insert member");
        profiles
            .insert_member(&Member::new(UserId::new(2), "Bob"))
            .await
            .expect("To insert member");

        let names = profiles
            .find_display_names(&[UserId::new(2), UserId::new(5)])
            .await
            .expect("To find display names");

        assert_eq!(names.len(), 1);
        assert_eq!(names.get(&UserId::new(2)).map(String::as_str), Some("Bob"));
        assert!(profiles
            .find_display_names(&[])
            .await
            .expect("To find display names")
            .is_empty());
    }
}
