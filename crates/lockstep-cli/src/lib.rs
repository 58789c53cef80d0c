//! Lockstep CLI library components.
//!
//! The `lockstep` binary lives in `main.rs`; argument handling, commands and
//! output formatting live here so they can be tested.

pub mod cli;
pub mod commands;
pub mod formatters;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}
