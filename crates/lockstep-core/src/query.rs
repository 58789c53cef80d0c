//! One-off version queries that don't touch the project.

use crate::Result;
use lockstep_deps::{newest_from_list, Resolution};
use serde::Serialize;

/// Answer to "which of these two versions should `package` be pinned to?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictQuery {
    /// Package the versions belong to
    pub package: String,
    /// Versions in the order they were given
    pub versions: [String; 2],
    /// Whether a major difference stops the comparison
    pub break_on_major: bool,
    /// The chosen version or the conflicting pair
    pub resolution: Resolution,
}

/// Pick the newer of two versions of `package`.
///
/// # Errors
///
/// Returns [`lockstep_deps::Error::MalformedVersion`] if either version has a
/// non-numeric segment.
pub fn resolve_conflict(
    package: &str,
    first: &str,
    second: &str,
    break_on_major: bool,
) -> Result<ConflictQuery> {
    let resolution = newest_from_list(&[first, second], break_on_major)?;
    Ok(ConflictQuery {
        package: package.to_string(),
        versions: [first.to_string(), second.to_string()],
        break_on_major,
        resolution,
    })
}
