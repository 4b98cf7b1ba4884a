use super::IProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use birthday_greetings_domain::{
    BirthRecord, Member, ProfileFieldValue, RawBirthValue, UserId,
};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct InMemoryProfileRepo {
    members: Mutex<Vec<Member>>,
    field_values: Mutex<Vec<ProfileFieldValue>>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(vec![]),
            field_values: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for InMemoryProfileRepo {
    async fn insert_member(&self, member: &Member) -> anyhow::Result<()> {
        insert(member, &self.members);
        Ok(())
    }

    async fn insert_field_value(&self, value: &ProfileFieldValue) -> anyhow::Result<()> {
        insert(value, &self.field_values);
        Ok(())
    }

    async fn fetch_birth_records(
        &self,
        field_id: i64,
        tz_offset_seconds: i64,
    ) -> anyhow::Result<Vec<BirthRecord>> {
        let active_members = find_by(&self.members, |m| m.is_active())
            .into_iter()
            .map(|m| m.id)
            .collect::<Vec<_>>();

        let records = find_by(&self.field_values, |v| {
            v.field_id == field_id && active_members.contains(&v.user_id)
        })
        .into_iter()
        .map(|v| BirthRecord {
            user_id: v.user_id,
            raw_value: RawBirthValue::from_stored(&v.value),
            tz_offset_seconds,
        })
        .collect();

        Ok(records)
    }

    async fn find_display_names(
        &self,
        user_ids: &[UserId],
    ) -> anyhow::Result<HashMap<UserId, String>> {
        Ok(find_by(&self.members, |m| user_ids.contains(&m.id))
            .into_iter()
            .map(|m| (m.id, m.display_name))
            .collect())
    }
}
