//! Incoming client events and their line format.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use thiserror::Error;

use crate::clock::{InvalidClock, format_clock, parse_clock};
use crate::types::{ClientName, ValidationError};

/// Incoming event kinds, identified on the wire by ids 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arrived,
    TookTable,
    StartedWaiting,
    Left,
}

impl EventKind {
    /// Numeric id used in the log format.
    pub const fn id(self) -> u8 {
        match self {
            Self::Arrived => 1,
            Self::TookTable => 2,
            Self::StartedWaiting => 3,
            Self::Left => 4,
        }
    }

    /// Looks up a kind by numeric id.
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Arrived),
            2 => Some(Self::TookTable),
            3 => Some(Self::StartedWaiting),
            4 => Some(Self::Left),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Self::from_id)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// Error type for unknown event ids.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown event id: {0}")]
pub struct UnknownEventKind(String);

/// A validated incoming event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// When the event happened.
    pub time: NaiveTime,
    /// What the client did.
    pub kind: EventKind,
    /// Who did it.
    pub client: ClientName,
    /// Target table, present only for [`EventKind::TookTable`].
    pub table: Option<usize>,
}

/// Canonical echo line: `HH:MM <id> <name> [<table>]`.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", format_clock(self.time), self.kind, self.client)?;
        if let Some(table) = self.table {
            write!(f, " {table}")?;
        }
        Ok(())
    }
}

/// Reasons an event line is structurally invalid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventLineError {
    #[error("expected 3 or 4 fields, got {0}")]
    FieldCount(usize),

    #[error(transparent)]
    Clock(#[from] InvalidClock),

    #[error("time went backward: {time} is before {previous}")]
    TimeWentBackward { time: String, previous: String },

    #[error(transparent)]
    Kind(#[from] UnknownEventKind),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("table number missing")]
    MissingTable,

    #[error("table number {0:?} is not an integer")]
    TableNotInteger(String),
}

/// Parses a single event line.
///
/// `previous` is the time of the preceding event, if any; `tables` is the
/// club's table count, bounding the table number of a took-table event.
pub fn parse_event_line(
    line: &str,
    previous: Option<NaiveTime>,
    tables: usize,
) -> Result<Event, EventLineError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(EventLineError::FieldCount(fields.len()));
    }

    let time = parse_clock(fields[0])?;
    if let Some(previous) = previous.filter(|&previous| time < previous) {
        return Err(EventLineError::TimeWentBackward {
            time: format_clock(time),
            previous: format_clock(previous),
        });
    }

    let kind: EventKind = fields[1].parse()?;
    let client = ClientName::new(fields[2])?;

    let table = match kind {
        EventKind::TookTable => {
            let raw = fields.get(3).ok_or(EventLineError::MissingTable)?;
            let table: usize = raw
                .parse()
                .map_err(|_| EventLineError::TableNotInteger((*raw).to_string()))?;
            if table < 1 || table > tables {
                return Err(ValidationError::TableOutOfRange { table, tables }.into());
            }
            Some(table)
        }
        _ => None,
    };

    Ok(Event {
        time,
        kind,
        client,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn kind_roundtrip_all_variants() {
        let variants = [
            EventKind::Arrived,
            EventKind::TookTable,
            EventKind::StartedWaiting,
            EventKind::Left,
        ];
        for variant in &variants {
            let parsed: EventKind = variant.to_string().parse().expect("should parse");
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn unknown_kind_errors() {
        for s in ["0", "5", "11", "x", ""] {
            assert!(s.parse::<EventKind>().is_err(), "{s:?} should not parse");
        }
        let err = "7".parse::<EventKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event id: 7");
    }

    #[test]
    fn parses_arrival() {
        let event = parse_event_line("08:48 1 client1", None, 3).unwrap();
        assert_eq!(event.time, t(8, 48));
        assert_eq!(event.kind, EventKind::Arrived);
        assert_eq!(event.client.as_str(), "client1");
        assert_eq!(event.table, None);
    }

    #[test]
    fn parses_took_table() {
        let event = parse_event_line("09:54 2 client1 3", Some(t(9, 54)), 3).unwrap();
        assert_eq!(event.kind, EventKind::TookTable);
        assert_eq!(event.table, Some(3));
    }

    #[test]
    fn ignores_fourth_field_for_other_kinds() {
        let event = parse_event_line("10:00 4 client1 whatever", None, 3).unwrap();
        assert_eq!(event.kind, EventKind::Left);
        assert_eq!(event.table, None);
        assert_eq!(event.to_string(), "10:00 4 client1");
    }

    #[test]
    fn rejects_bad_field_count() {
        assert_eq!(
            parse_event_line("09:00 1", None, 1),
            Err(EventLineError::FieldCount(2))
        );
        assert_eq!(
            parse_event_line("09:00 2 a 1 extra", None, 1),
            Err(EventLineError::FieldCount(5))
        );
        assert_eq!(parse_event_line("", None, 1), Err(EventLineError::FieldCount(0)));
    }

    #[test]
    fn rejects_time_going_backward() {
        let err = parse_event_line("09:00 1 a", Some(t(9, 1)), 1).unwrap_err();
        assert!(matches!(err, EventLineError::TimeWentBackward { .. }));
        // equal timestamps are allowed
        assert!(parse_event_line("09:01 1 a", Some(t(9, 1)), 1).is_ok());
    }

    #[test]
    fn rejects_malformed_fields() {
        assert!(matches!(
            parse_event_line("9:00 1 a", None, 1),
            Err(EventLineError::Clock(_))
        ));
        assert!(matches!(
            parse_event_line("09:00 5 a", None, 1),
            Err(EventLineError::Kind(_))
        ));
        assert!(matches!(
            parse_event_line("09:00 1 a.b", None, 1),
            Err(EventLineError::Invalid(ValidationError::InvalidCharacter { .. }))
        ));
    }

    #[test]
    fn took_table_requires_valid_table() {
        assert_eq!(
            parse_event_line("09:00 2 a", None, 2),
            Err(EventLineError::MissingTable)
        );
        assert_eq!(
            parse_event_line("09:00 2 a x", None, 2),
            Err(EventLineError::TableNotInteger("x".into()))
        );
        assert!(matches!(
            parse_event_line("09:00 2 a 0", None, 2),
            Err(EventLineError::Invalid(ValidationError::TableOutOfRange { .. }))
        ));
        assert!(matches!(
            parse_event_line("09:00 2 a 3", None, 2),
            Err(EventLineError::Invalid(ValidationError::TableOutOfRange { .. }))
        ));
    }

    #[test]
    fn echo_is_canonical() {
        let event = parse_event_line("09:00\t+2   a   01", None, 2).unwrap();
        assert_eq!(event.to_string(), "09:00 2 a 1");
    }
}
