use crate::shared::entity::UserId;
use serde::{Deserialize, Serialize};

/// Account status of a member. Disabled members are left out of every scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberStatus {
    Active,
    Disabled,
}

impl MemberStatus {
    /// Status as stored by the directory, where `1` marks a disabled account
    pub fn from_stored(status: i32) -> Self {
        if status == 1 {
            Self::Disabled
        } else {
            Self::Active
        }
    }

    pub fn to_stored(self) -> i32 {
        match self {
            Self::Active => 0,
            Self::Disabled => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: UserId,
    pub display_name: String,
    pub status: MemberStatus,
}

impl Member {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            status: MemberStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// A raw value stored for a member in one of the profile fields
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFieldValue {
    pub field_id: i64,
    pub user_id: UserId,
    pub value: String,
}
