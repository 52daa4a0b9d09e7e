//! Timestamp handling for Rejseplanen departure records.
//!
//! The API splits every timestamp into a time-of-day string ("HH:MM") and a
//! date string ("DD.MM.YY"), both in Danish local time with no offset. This
//! module recombines the two halves into a [`NaiveDateTime`].
//!
//! Parsing is a pure function of its inputs: the format descriptor is a
//! constant, so concurrent callers never observe each other's configuration.

use chrono::NaiveDateTime;

/// Combined format of `"<time> <date>"` as sent by the API.
const TIMESTAMP_FORMAT: &str = "%H:%M %d.%m.%y";

/// Format of the time-of-day half.
const TIME_FORMAT: &str = "%H:%M";

/// Format of the date half. `%y` applies chrono's century pivot
/// (00-69 → 20xx, 70-99 → 19xx).
const DATE_FORMAT: &str = "%d.%m.%y";

/// Error returned when a time/date pair cannot be combined into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimestampError {
    input: String,
    reason: &'static str,
}

impl TimestampError {
    fn new(time: &str, date: &str, reason: &'static str) -> Self {
        Self {
            input: format!("{time} {date}"),
            reason,
        }
    }

    /// The offending input, as `"<time> <date>"`.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Combine a time-of-day and a date into a naive local timestamp.
///
/// Both halves must use exactly two digits per field.
///
/// # Examples
///
/// ```
/// use rejseplanen::domain::parse_timestamp;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let ts = parse_timestamp("14:30", "15.03.24").unwrap();
/// assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
/// assert_eq!(ts.time(), NaiveTime::from_hms_opt(14, 30, 0).unwrap());
///
/// // Single-digit fields are rejected
/// assert!(parse_timestamp("9:30", "15.03.24").is_err());
/// // So are impossible dates
/// assert!(parse_timestamp("09:30", "30.02.24").is_err());
/// ```
pub fn parse_timestamp(time: &str, date: &str) -> Result<NaiveDateTime, TimestampError> {
    if !matches_pattern(time, b':', 1) {
        return Err(TimestampError::new(time, date, "expected HH:MM time"));
    }
    if !matches_pattern(date, b'.', 2) {
        return Err(TimestampError::new(time, date, "expected DD.MM.YY date"));
    }

    NaiveDateTime::parse_from_str(&format!("{time} {date}"), TIMESTAMP_FORMAT)
        .map_err(|_| TimestampError::new(time, date, "out of range"))
}

/// Render the time-of-day half of a timestamp as "HH:MM".
pub fn format_time(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIME_FORMAT).to_string()
}

/// Render the date half of a timestamp as "DD.MM.YY".
pub fn format_date(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DATE_FORMAT).to_string()
}

/// Check that `s` is `separators + 1` groups of two ASCII digits joined by `sep`.
fn matches_pattern(s: &str, sep: u8, separators: usize) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 2 + separators * 3 {
        return false;
    }

    bytes.iter().enumerate().all(|(i, &b)| {
        if i % 3 == 2 {
            b == sep
        } else {
            b.is_ascii_digit()
        }
    })
}
