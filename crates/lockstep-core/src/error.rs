//! Error types for lockstep core.

use thiserror::Error;

/// Result type for lockstep runs.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a run.
///
/// Per-package problems (major mismatches, unparseable versions, unreadable
/// package directories) are not errors; they are recorded in the
/// [`AnalysisReport`](crate::AnalysisReport).
#[derive(Debug, Error)]
pub enum Error {
    /// Lockfile, version or manifest error.
    #[error(transparent)]
    Deps(#[from] lockstep_deps::Error),

    /// The scanner could not be built from the configuration.
    #[error(transparent)]
    Scan(#[from] lockstep_native::ScanError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] lockstep_config::ConfigError),

    /// I/O error outside the lockfile and manifest.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
