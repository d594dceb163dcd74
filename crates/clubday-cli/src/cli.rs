//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Computer club day report.
///
/// Replays a day of client events against the club's tables and prints the
/// annotated event log followed by each table's revenue and busy time.
#[derive(Debug, Parser)]
#[command(name = "clubday", version, about, long_about = None)]
pub struct Cli {
    /// Path to the event log.
    pub input: PathBuf,
}
