//! Error types for lockstep-deps

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using lockstep-deps Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lockstep-deps
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The lockfile contained no package entries
    #[error("Malformed lockfile: {0}")]
    MalformedLockfile(String),

    /// A version segment is not a non-negative integer
    #[error("Malformed version '{version}': segment '{segment}' is not numeric")]
    MalformedVersion {
        /// The full version string
        version: String,
        /// The offending segment
        segment: String,
    },

    /// `newest_from_list` was given nothing to fold
    #[error("Cannot pick the newest version from an empty list")]
    EmptyVersionList,

    /// The manifest is not a JSON object, or a pin map has the wrong shape
    #[error("Invalid manifest {0}: {1}")]
    ManifestParse(PathBuf, String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
