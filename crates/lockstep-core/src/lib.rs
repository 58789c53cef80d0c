//! Lockstep Core - the analysis pipeline behind the `lockstep` CLI.
//!
//! Ties the other crates together:
//!
//! ```text
//! ┌─────────────────┐
//! │  lockstep-cli   │  (User interface)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  lockstep-core  │  (This crate - pipeline and report)
//! └────────┬────────┘
//!          │
//!    ┌─────┼──────────────┬──────────────────┐
//!    ▼     ▼              ▼                  ▼
//! deps   native        config               fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use lockstep_config::LockstepConfig;
//! use lockstep_core::{Analyzer, RunMode};
//! use lockstep_fs::NativeFileSystem;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> lockstep_core::Result<()> {
//! let fs = Arc::new(NativeFileSystem::new(".")?);
//! let report = Analyzer::new(fs, LockstepConfig::default())
//!     .run(RunMode::ReportOnly)
//!     .await?;
//! println!("{} native duplicates", report.native_duplicates.len());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod query;
pub mod types;

pub use engine::Analyzer;
pub use error::{Error, Result};
pub use query::{resolve_conflict, ConflictQuery};
pub use types::{AnalysisReport, PeerDeclaration, RunMode, Statistics};
