mod birthday;
pub mod date;
mod member;
mod notification;
mod shared;

pub use birthday::{
    match_birthdays, BirthRecord, MatchResult, RawBirthValue, ReferenceDate, SkippedRecord,
};
pub use date::ParseError;
pub use member::{Member, MemberStatus, ProfileFieldValue};
pub use notification::{
    NotificationContent, NotificationEvent, BIRTHDAY_ACTION, BIRTHDAY_COMPONENT,
};
pub use shared::entity::{InvalidUserIdError, UserId};

pub use chrono::NaiveDate;
pub use chrono_tz::Tz;
