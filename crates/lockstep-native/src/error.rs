//! Error types for lockstep-native.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors raised while scanning an installed package.
///
/// Per-package scan failures never escape [`classify`](crate::NativeModuleScanner::classify);
/// they are logged and the package is treated as non-native.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A package directory or one of its files could not be read.
    #[error("I/O error scanning {path}: {source}")]
    Io {
        /// Path being read when the error occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The native-bridge signature is not a valid regular expression.
    #[error("Invalid signature pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The concurrency limit is zero.
    #[error("Scan concurrency must be at least 1")]
    ZeroConcurrency,
}
