use crate::shared::entity::UserId;
use serde::{Deserialize, Serialize};

/// Component tag the notification store files birthday notifications under
pub const BIRTHDAY_COMPONENT: &str = "birthday";
/// Action tag of the birthday greeting notification
pub const BIRTHDAY_ACTION: &str = "ps_birthday_action";

/// An in-app notification handed over to the notification store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Receiver of the notification
    pub user_id: UserId,
    /// Item the notification is about, which is the receiver itself
    pub item_id: UserId,
    pub component: String,
    pub action: String,
    /// Timestamp in millis of when the notification was created
    pub timestamp: i64,
    pub is_new: bool,
}

impl NotificationEvent {
    pub fn birthday(user_id: UserId, timestamp: i64) -> Self {
        Self {
            user_id,
            item_id: user_id,
            component: BIRTHDAY_COMPONENT.into(),
            action: BIRTHDAY_ACTION.into(),
            timestamp,
            is_new: true,
        }
    }

    pub fn is_birthday_greeting(&self) -> bool {
        self.component == BIRTHDAY_COMPONENT && self.action == BIRTHDAY_ACTION
    }
}

/// What a notification looks like to the member receiving it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "camelCase")]
pub enum NotificationContent {
    Text(String),
    Linked { text: String, url: String },
}

impl NotificationContent {
    pub fn birthday_greeting(site_name: &str, link: Option<String>) -> Self {
        let text = format!(
            "Wish you a very happy birthday. {} wishes you more success and peace in life.",
            site_name
        );
        match link {
            Some(url) if !url.is_empty() => Self::Linked { text, url },
            _ => Self::Text(text),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Linked { text, .. } => text,
        }
    }

    /// Renders the content for consumers that expect markup
    pub fn to_html(&self) -> String {
        match self {
            Self::Text(text) => escape_html(text),
            Self::Linked { text, url } => format!(
                r#"<a href="{}" title="{}">{}</a>"#,
                escape_html(url),
                escape_html(text),
                escape_html(text)
            ),
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_birthday_event() {
        let user_id = UserId::new(12);
        let event = NotificationEvent::birthday(user_id, 1000);
        assert_eq!(event.item_id, user_id);
        assert_eq!(event.component, "birthday");
        assert_eq!(event.action, "ps_birthday_action");
        assert!(event.is_new);
        assert!(event.is_birthday_greeting());
    }

    #[test]
    fn it_builds_greeting_content() {
        let content = NotificationContent::birthday_greeting("Rust Club", None);
        assert_eq!(
            content.text(),
            "Wish you a very happy birthday. Rust Club wishes you more success and peace in life."
        );
        assert!(matches!(content, NotificationContent::Text(_)));

        let content = NotificationContent::birthday_greeting("Rust Club", Some("".into()));
        assert!(matches!(content, NotificationContent::Text(_)));

        let content =
            NotificationContent::birthday_greeting("Rust Club", Some("https://rust.club".into()));
        assert!(matches!(content, NotificationContent::Linked { .. }));
    }

    #[test]
    fn it_escapes_rendered_html() {
        let content = NotificationContent::birthday_greeting("<Tom & Jerry>", None);
        assert_eq!(
            content.to_html(),
            "Wish you a very happy birthday. &lt;Tom &amp; Jerry&gt; wishes you more success and peace in life."
        );

        let content = NotificationContent::Linked {
            text: "Happy \"day\"".into(),
            url: "https://a.b/?x=1&y=2".into(),
        };
        assert_eq!(
            content.to_html(),
            r#"<a href="https://a.b/?x=1&amp;y=2" title="Happy &quot;day&quot;">Happy &quot;day&quot;</a>"#
        );
    }
}
