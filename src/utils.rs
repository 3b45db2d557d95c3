//! Timestamp helpers shared by the accumulators.
//!
//! Two independent ways of reading the hour are kept per link: media and the
//! any-message counter scan for the first whitespace-prefixed number, text
//! messages parse the whole timestamp. They can disagree on unusual inputs.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;

use crate::error::{ChatStatsError, Result};
use crate::models::HourSlot;

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

const OFFSET_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

fn hour_token() -> &'static Regex {
    static HOUR_TOKEN: OnceLock<Regex> = OnceLock::new();
    // Literal pattern, cannot fail to compile
    #[allow(clippy::expect_used)]
    HOUR_TOKEN.get_or_init(|| Regex::new(r"\s[0-9]+").expect("hour token regex"))
}

/// Hour taken from the first whitespace-prefixed run of digits in `date`.
///
/// `"2023-01-01 5:30"` yields 5. No full date parsing happens here and the
/// value is not range-checked; a digit run too long for `u64` saturates.
pub fn extract_hour(date: &str) -> Result<u64> {
    let token = hour_token()
        .find(date)
        .map(|m| m.as_str().trim_start())
        .ok_or_else(|| ChatStatsError::MalformedHour(date.to_string()))?;
    // The token is all ASCII digits, so parsing only fails on overflow
    Ok(token.parse().unwrap_or(u64::MAX))
}

/// [`extract_hour`] as a display slot
pub fn hour_slot(date: &str) -> Result<HourSlot> {
    extract_hour(date).map(HourSlot)
}

/// Parse an exported timestamp into wall-clock time.
///
/// Offsets are honoured by keeping the local time of the given offset.
pub fn parse_timestamp(date: &str) -> Result<NaiveDateTime> {
    let date = date.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Ok(parsed.naive_local());
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(parsed) = DateTime::parse_from_str(date, layout) {
            return Ok(parsed.naive_local());
        }
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(date, layout) {
            return Ok(parsed);
        }
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(date, layout).ok())
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ChatStatsError::InvalidDate(date.to_string()))
}

/// Hour slot of a fully parsed timestamp
#[must_use]
pub fn slot_of(timestamp: &NaiveDateTime) -> HourSlot {
    HourSlot(u64::from(timestamp.hour()))
}
