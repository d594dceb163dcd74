//! Core domain logic for computer club session logs.
//!
//! This crate contains:
//! - Parsing: header lines and a lazy, fail-fast stream of client events
//! - The club state machine: occupancy, waiting list and per-table billing
//! - Outgoing messages emitted while replaying a day

pub mod clock;
mod club;
pub mod config;
pub mod event;
pub mod message;
pub mod parser;
pub mod types;

pub use club::{Club, TableStat};
pub use config::ClubConfig;
pub use event::{Event, EventKind};
pub use message::{ClubError, Outgoing, OutgoingKind};
pub use parser::{ClubLog, EventParser, InputError, parse_log};
pub use types::{ClientName, ValidationError};
