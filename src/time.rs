//! Rendering and typed decoding of the time and date fields.

use chrono::{NaiveDate, NaiveTime};

/// Returned by [`format_time`] when there is nothing to show.
pub const NOT_AVAILABLE: &str = "N/A";

const TIME_LENGTH: usize = 6;

/// Formats a `hhmmss[.sss]` time as `hh:mm:ss UTC`.
///
/// The first six characters are used verbatim, fractional seconds are
/// dropped. Returns [`NOT_AVAILABLE`] for absent or short input.
pub fn format_time(time: Option<&str>) -> String {
    let time = match time {
        Some(t) if t.len() >= TIME_LENGTH => t,
        _ => return NOT_AVAILABLE.to_owned(),
    };
    match (time.get(0..2), time.get(2..4), time.get(4..6)) {
        (Some(h), Some(m), Some(s)) => format!("{}:{}:{} UTC", h, m, s),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Converts a `hhmmss[.sss]` field to a time.
#[inline]
pub fn parse_utc(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H%M%S%.f").ok()
}

/// Converts a `ddmmyy` field to a date.
#[inline]
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%d%m%y").ok()
}
