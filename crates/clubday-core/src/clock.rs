//! `HH:MM` clock literals and duration formatting.

use chrono::{NaiveTime, TimeDelta, Timelike};
use thiserror::Error;

/// Error for a malformed `HH:MM` literal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid clock time {0:?}, expected HH:MM")]
pub struct InvalidClock(pub String);

/// Parses a strict `HH:MM` time of day.
///
/// Both parts must be exactly two ASCII digits; hours run 00-23 and
/// minutes 00-59.
pub fn parse_clock(s: &str) -> Result<NaiveTime, InvalidClock> {
    let invalid = || InvalidClock(s.to_string());

    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digit = |i: usize| {
        let b = bytes[i];
        b.is_ascii_digit().then(|| u32::from(b - b'0'))
    };
    let (Some(h1), Some(h2), Some(m1), Some(m2)) = (digit(0), digit(1), digit(3), digit(4)) else {
        return Err(invalid());
    };

    NaiveTime::from_hms_opt(h1 * 10 + h2, m1 * 10 + m2, 0).ok_or_else(invalid)
}

/// Formats a time of day as `HH:MM`.
pub fn format_clock(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Formats an accumulated duration as `HH:MM`.
///
/// Negative durations render as `00:00`.
pub fn format_duration(d: TimeDelta) -> String {
    let total_minutes = d.num_minutes().max(0);
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Whole hours to bill for `d`, rounding any partial hour up.
pub fn billable_hours(d: TimeDelta) -> u64 {
    let minutes = u64::try_from(d.num_minutes()).unwrap_or(0);
    minutes.div_ceil(60)
}
