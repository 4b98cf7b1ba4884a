use birthday_greetings_domain::{NotificationContent, NotificationEvent, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayMemberDTO {
    pub user_id: UserId,
    pub display_name: String,
    /// Link for sending the member a greeting. Only present for signed in
    /// viewers, never for the viewer themselves, and not when private
    /// messages are unavailable.
    pub greeting_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub user_id: UserId,
    pub item_id: UserId,
    pub component: String,
    pub action: String,
    pub timestamp: i64,
    pub is_new: bool,
    pub content: NotificationContent,
}

impl NotificationDTO {
    pub fn new(event: NotificationEvent, content: NotificationContent) -> Self {
        Self {
            user_id: event.user_id,
            item_id: event.item_id,
            component: event.component,
            action: event.action,
            timestamp: event.timestamp,
            is_new: event.is_new,
            content,
        }
    }
}

/// A notification as a consumer asked for it: the rendered markup, or the
/// full object.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RenderedNotificationDTO {
    Html(String),
    Object(NotificationDTO),
}
