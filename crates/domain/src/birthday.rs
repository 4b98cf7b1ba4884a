use crate::date::{date_from_timestamp, parse_date_text, ParseError};
use crate::shared::entity::UserId;
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The value a member stored in the date of birth profile field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBirthValue {
    /// Seconds since the epoch
    Timestamp(i64),
    /// Free text like "1990-03-15" or "March 15, 1990"
    Text(String),
}

impl RawBirthValue {
    /// Classifies a stored profile value. Anything numeric is a timestamp,
    /// the rest is left for the date parser.
    pub fn from_stored(value: &str) -> Self {
        let trimmed = value.trim();
        if let Ok(timestamp) = trimmed.parse::<i64>() {
            return Self::Timestamp(timestamp);
        }
        match trimmed.parse::<f64>() {
            Ok(timestamp) if timestamp.is_finite() && timestamp.abs() < i64::MAX as f64 => {
                Self::Timestamp(timestamp.trunc() as i64)
            }
            _ => Self::Text(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BirthRecord {
    pub user_id: UserId,
    pub raw_value: RawBirthValue,
    /// Seconds added to the parsed value before reading its calendar date
    pub tz_offset_seconds: i64,
}

impl BirthRecord {
    /// The calendar date this record resolves to after applying its offset.
    /// Text and timestamp values get the offset added the same way.
    pub fn birth_date(&self) -> Result<NaiveDate, ParseError> {
        let timestamp = match &self.raw_value {
            RawBirthValue::Timestamp(timestamp) => *timestamp,
            RawBirthValue::Text(text) => parse_date_text(text)?,
        };
        let adjusted = timestamp
            .checked_add(self.tz_offset_seconds)
            .ok_or(ParseError::OutOfRange(timestamp))?;
        date_from_timestamp(adjusted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDate {
    pub month: u32,
    pub day: u32,
}

impl ReferenceDate {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn matches(&self, date: &NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

impl From<NaiveDate> for ReferenceDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.month(), date.day())
    }
}

/// A record whose value could not be turned into a date
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub user_id: UserId,
    pub error: ParseError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    /// Members with a birthday on the reference date, in input order
    pub user_ids: Vec<UserId>,
    pub skipped: Vec<SkippedRecord>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }
}

/// Finds the members whose birthday falls on `reference`.
///
/// Only the first record of a user is considered. Unparseable values are
/// reported in `skipped` and never abort the scan. A Feb 29 birthday only
/// matches when the reference date is Feb 29.
pub fn match_birthdays(records: &[BirthRecord], reference: ReferenceDate) -> MatchResult {
    let mut seen = HashSet::with_capacity(records.len());
    let mut result = MatchResult::default();

    for record in records {
        if !seen.insert(record.user_id) {
            continue;
        }
        match record.birth_date() {
            Ok(date) if reference.matches(&date) => result.user_ids.push(record.user_id),
            Ok(_) => {}
            Err(error) => result.skipped.push(SkippedRecord {
                user_id: record.user_id,
                error,
            }),
        }
    }

    result
}
