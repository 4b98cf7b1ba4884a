use crate::dtos::{BirthdayMemberDTO, NotificationDTO, RenderedNotificationDTO};
use birthday_greetings_domain::UserId;
use serde::{Deserialize, Serialize};

pub mod get_todays_birthdays {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// Signed in member looking at the list. Anonymous viewers and the
        /// member themselves are not offered to send a greeting.
        pub viewer_id: Option<UserId>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Date of today in the site timezone, formatted as `YYYY-MM-DD`
        pub date: String,
        pub members: Vec<BirthdayMemberDTO>,
        /// Set when nobody has a birthday today
        pub message: Option<String>,
    }

    pub const EMPTY_MESSAGE: &str = "No Birthdays Found Today.";

    impl APIResponse {
        pub fn new(date: String, members: Vec<BirthdayMemberDTO>) -> Self {
            let message = if members.is_empty() {
                Some(EMPTY_MESSAGE.into())
            } else {
                None
            };
            Self {
                date,
                members,
                message,
            }
        }
    }
}

pub mod run_daily_scan {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Date of the scan in the site timezone, formatted as `YYYY-MM-DD`
        pub date: String,
        /// Number of members with a birthday on `date`
        pub matched: usize,
        /// Notifications handed out by this scan
        pub notifications: Vec<NotificationDTO>,
        /// Members with a birthday that were already notified earlier today
        pub already_notified: usize,
        /// Members whose notification could not be stored, they are retried
        /// by the next scan
        pub failed_count: usize,
        /// Records with a date of birth that could not be read
        pub skipped_records: usize,
    }
}

pub mod get_user_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub user_id: UserId,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub enum NotificationFormat {
        /// Html markup, ready to be shown
        String,
        Object,
    }

    impl Default for NotificationFormat {
        fn default() -> Self {
            Self::Object
        }
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub format: Option<NotificationFormat>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<RenderedNotificationDTO>,
    }
}
