use chrono::prelude::*;
use chrono::Offset;
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Date of birth is empty")]
    Empty,
    #[error("Date of birth: `{0}` is not a recognizable date")]
    Unrecognized(String),
    #[error("Date of birth timestamp: {0} is out of range")]
    OutOfRange(i64),
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

// Numeric day-first formats use `.` or `-`, numeric month-first use `/`.
const DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
];

/// Parses free-text date of birth into a UTC timestamp in seconds.
///
/// Values without a time component are taken as midnight UTC.
pub fn parse_date_text(text: &str) -> Result<i64, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.timestamp());
    }

    for format in &DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&datetime).timestamp());
        }
    }

    for format in &DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&midnight).timestamp());
            }
        }
    }

    Err(ParseError::Unrecognized(text.to_string()))
}

/// Converts seconds since the epoch into the calendar date it falls on in UTC
pub fn date_from_timestamp(timestamp: i64) -> Result<NaiveDate, ParseError> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|datetime| datetime.date_naive())
        .ok_or(ParseError::OutOfRange(timestamp))
}

/// The calendar date at `now_millis` in the site's timezone
pub fn site_today(now_millis: i64, tz: &Tz) -> NaiveDate {
    let now = Utc
        .timestamp_millis_opt(now_millis)
        .single()
        .unwrap_or_else(Utc::now);
    now.with_timezone(tz).date_naive()
}

/// Offset of the site's timezone from UTC at `now_millis`, in seconds
pub fn utc_offset_seconds(now_millis: i64, tz: &Tz) -> i64 {
    let now = Utc
        .timestamp_millis_opt(now_millis)
        .single()
        .unwrap_or_else(Utc::now);
    let offset = tz.offset_from_utc_datetime(&now.naive_utc()).fix();
    offset.local_minus_utc() as i64
}
