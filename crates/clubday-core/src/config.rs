//! Club configuration read from the three header lines of a log.

use chrono::NaiveTime;
use thiserror::Error;

use crate::clock::{InvalidClock, parse_clock};
use crate::types::{ValidationError, parse_positive};

/// Immutable club parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubConfig {
    /// Number of tables, numbered `1..=tables`.
    pub tables: usize,
    /// Opening time.
    pub open: NaiveTime,
    /// Closing time. Not required to be after `open`.
    pub close: NaiveTime,
    /// Price of one started hour at a table.
    pub tariff: u32,
}

impl ClubConfig {
    /// Whether the club admits arrivals at `t`: `open <= t < close`.
    pub fn is_open(&self, t: NaiveTime) -> bool {
        self.open <= t && t < self.close
    }
}

/// Reasons a header line is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error(transparent)]
    Count(#[from] ValidationError),

    #[error("expected opening and closing time, got {0} fields")]
    HoursFieldCount(usize),

    #[error(transparent)]
    Clock(#[from] InvalidClock),
}

/// Parses the table count line.
pub fn parse_tables(line: &str) -> Result<usize, HeaderError> {
    let n = parse_positive("table count", line)?;
    // u32 always fits in usize on supported targets
    Ok(n as usize)
}

/// Parses the `HH:MM HH:MM` opening hours line.
pub fn parse_hours(line: &str) -> Result<(NaiveTime, NaiveTime), HeaderError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [open, close] = fields.as_slice() else {
        return Err(HeaderError::HoursFieldCount(fields.len()));
    };
    Ok((parse_clock(open)?, parse_clock(close)?))
}

/// Parses the hourly tariff line.
pub fn parse_tariff(line: &str) -> Result<u32, HeaderError> {
    Ok(parse_positive("tariff", line)?)
}
