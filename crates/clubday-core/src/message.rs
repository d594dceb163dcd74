//! Outgoing messages produced by the club.

use std::fmt;

use chrono::NaiveTime;
use thiserror::Error;

use crate::clock::format_clock;
use crate::types::ClientName;

/// A rule violation reported in-stream. Never a process failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClubError {
    /// Arrival outside opening hours.
    #[error("NotOpenYet")]
    NotOpenYet,
    /// Arrival of a client who is already inside.
    #[error("YouShallNotPass")]
    YouShallNotPass,
    /// The requested table is occupied.
    #[error("PlaceIsBusy")]
    PlaceIsBusy,
    /// The client never arrived.
    #[error("ClientUnknown")]
    ClientUnknown,
    /// The client queued while a table was free.
    #[error("ICanWaitNoLonger!")]
    ICanWaitNoLonger,
}

/// Payload of an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingKind {
    /// A client left the club without an incoming left event.
    ClientLeft(ClientName),
    /// A waiting client was seated at a freed table.
    ClientTookTable(ClientName, usize),
    /// A rule violation.
    Error(ClubError),
}

impl OutgoingKind {
    /// Numeric id used in the log format.
    pub const fn code(&self) -> u8 {
        match self {
            Self::ClientLeft(_) => 11,
            Self::ClientTookTable(..) => 12,
            Self::Error(_) => 13,
        }
    }
}

/// A message emitted at a point in time, rendered as `HH:MM <code> <body>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub time: NaiveTime,
    pub kind: OutgoingKind,
}

impl Outgoing {
    pub const fn new(time: NaiveTime, kind: OutgoingKind) -> Self {
        Self { time, kind }
    }

    pub const fn error(time: NaiveTime, error: ClubError) -> Self {
        Self::new(time, OutgoingKind::Error(error))
    }
}

impl fmt::Display for Outgoing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", format_clock(self.time), self.kind.code())?;
        match &self.kind {
            OutgoingKind::ClientLeft(client) => write!(f, "{client}"),
            OutgoingKind::ClientTookTable(client, table) => write!(f, "{client} {table}"),
            OutgoingKind::Error(error) => write!(f, "{error}"),
        }
    }
}
