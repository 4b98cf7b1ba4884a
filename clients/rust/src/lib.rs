mod base;
mod birthday;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use birthday::BirthdayClient;
pub use birthday::{GetTodaysBirthdaysInput, GetUserNotificationsInput};
pub use birthday_greetings_api_structs::dtos::*;
pub use birthday_greetings_api_structs::get_todays_birthdays::EMPTY_MESSAGE;
pub use birthday_greetings_api_structs::get_user_notifications::NotificationFormat;
pub use birthday_greetings_domain::{NotificationContent, UserId};
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use birthday_greetings_api_structs::dtos::BirthdayMemberDTO as BirthdayMember;
pub use birthday_greetings_api_structs::dtos::NotificationDTO as Notification;

/// Birthday Greetings Server SDK
///
/// The SDK contains methods for interacting with the birthday greetings
/// server API.
#[derive(Clone)]
pub struct BirthdayGreetingsSDK {
    pub birthday: BirthdayClient,
    pub status: StatusClient,
}

impl BirthdayGreetingsSDK {
    pub fn new<T: Into<String>>(address: T) -> Self {
        let base = Arc::new(BaseClient::new(address.into()));
        let birthday = BirthdayClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { birthday, status }
    }
}
