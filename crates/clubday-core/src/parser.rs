//! Whole-log parsing: header, then a lazy stream of validated events.
//!
//! Parsing is all-or-nothing. The first structurally invalid line ends the
//! run, and the caller reports that raw line instead of any output.

use std::iter::FusedIterator;

use chrono::NaiveTime;
use thiserror::Error;

use crate::config::{ClubConfig, HeaderError, parse_hours, parse_tables, parse_tariff};
use crate::event::{Event, EventLineError, parse_event_line};

/// Output emitted when the log ends before the header is complete.
pub const NOT_ENOUGH_LINES: &str = "not enough lines in file";

/// A structural failure in the input log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The log ended before all three header lines were read.
    #[error("not enough lines in file")]
    NotEnoughLines,

    /// One of the header lines is malformed.
    #[error("line {number}: {source}")]
    Header {
        number: usize,
        line: String,
        #[source]
        source: HeaderError,
    },

    /// An event line is malformed.
    #[error("line {number}: {source}")]
    Event {
        number: usize,
        line: String,
        #[source]
        source: EventLineError,
    },
}

impl InputError {
    /// The text to print in place of a report: the offending line verbatim.
    pub fn output(&self) -> &str {
        match self {
            Self::NotEnoughLines => NOT_ENOUGH_LINES,
            Self::Header { line, .. } | Self::Event { line, .. } => line,
        }
    }
}

/// Splits text into lines, dropping a trailing `\r` from each.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Reads the three header lines into a [`ClubConfig`].
pub fn parse_header<'a, I>(lines: &mut I) -> Result<ClubConfig, InputError>
where
    I: Iterator<Item = &'a str>,
{
    fn header_line<'a, T>(
        lines: &mut impl Iterator<Item = &'a str>,
        number: usize,
        parse: impl FnOnce(&str) -> Result<T, HeaderError>,
    ) -> Result<T, InputError> {
        let line = lines.next().ok_or(InputError::NotEnoughLines)?;
        parse(line).map_err(|source| InputError::Header {
            number,
            line: line.to_string(),
            source,
        })
    }

    let tables = header_line(lines, 1, parse_tables)?;
    let (open, close) = header_line(lines, 2, parse_hours)?;
    let tariff = header_line(lines, 3, parse_tariff)?;

    Ok(ClubConfig {
        tables,
        open,
        close,
        tariff,
    })
}

/// Lazy iterator over the event lines of a log.
///
/// Yields validated events until the input ends or a line fails
/// validation; after yielding an error it yields nothing more.
#[derive(Debug)]
pub struct EventParser<I> {
    lines: I,
    tables: usize,
    previous: Option<NaiveTime>,
    number: usize,
    failed: bool,
}

impl<'a, I> EventParser<I>
where
    I: Iterator<Item = &'a str>,
{
    /// Creates a parser over event lines. `first_line` is the 1-based line
    /// number of the first event line, used in error reports.
    pub fn new(lines: I, tables: usize, first_line: usize) -> Self {
        Self {
            lines,
            tables,
            previous: None,
            number: first_line,
            failed: false,
        }
    }
}

impl<'a, I> Iterator for EventParser<I>
where
    I: Iterator<Item = &'a str>,
{
    type Item = Result<Event, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let line = self.lines.next()?;
        let number = self.number;
        self.number += 1;

        match parse_event_line(line, self.previous, self.tables) {
            Ok(event) => {
                self.previous = Some(event.time);
                Some(Ok(event))
            }
            Err(source) => {
                tracing::debug!(number, %source, "rejected event line");
                self.failed = true;
                Some(Err(InputError::Event {
                    number,
                    line: line.to_string(),
                    source,
                }))
            }
        }
    }
}

impl<'a, I> FusedIterator for EventParser<I> where I: Iterator<Item = &'a str> {}

/// A fully parsed log: configuration plus every event in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubLog {
    pub config: ClubConfig,
    pub events: Vec<Event>,
}

/// Parses a whole log. Fails at the first invalid line.
pub fn parse_log(text: &str) -> Result<ClubLog, InputError> {
    let mut lines = lines(text);
    let config = parse_header(&mut lines)?;
    let events = EventParser::new(lines, config.tables, 4).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(
        tables = config.tables,
        events = events.len(),
        "parsed log"
    );
    Ok(ClubLog { config, events })
}
