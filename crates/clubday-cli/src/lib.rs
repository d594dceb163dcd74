//! Computer club report CLI library.
//!
//! This crate provides the CLI interface and the session report renderer.

mod cli;
mod config;
pub mod report;

pub use cli::Cli;
pub use config::{Config, DEFAULT_LOG_FILTER};
