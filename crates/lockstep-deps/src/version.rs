//! Dotted-numeric version comparison
//!
//! Lockfile versions are compared segment by segment as plain integers.
//! Prerelease tags and build metadata are not understood; a version carrying
//! them is rejected as [`Error::MalformedVersion`] rather than guessed at.

use crate::{Error, Result};
use serde::Serialize;

/// Outcome of comparing two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// The first version is kept (greater, or tied).
    First,
    /// The second version is strictly greater.
    Second,
    /// Majors differ and the caller asked to stop at major boundaries.
    MajorMismatch,
}

/// Result of folding a list of versions down to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// A single version every consumer can be pinned to.
    Resolved {
        /// The chosen version
        version: String,
    },
    /// Two installed versions disagree on the major segment.
    Unresolvable(MajorConflict),
}

impl Resolution {
    /// The chosen version, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Resolved { version } => Some(version),
            Self::Unresolvable(_) => None,
        }
    }
}

/// The pair of versions whose majors collided during a fold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MajorConflict {
    /// The version carried by the fold so far
    pub kept: String,
    /// The version it was compared against
    pub candidate: String,
}

fn split_version(version: &str) -> Result<Vec<u64>> {
    version
        .split('.')
        .map(|segment| {
            let malformed = || Error::MalformedVersion {
                version: version.to_string(),
                segment: segment.to_string(),
            };
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            segment.parse::<u64>().map_err(|_| malformed())
        })
        .collect()
}

/// Compare two dotted-numeric versions.
///
/// Segments are walked left to right for as many segments as `a` has. When
/// `b` is shorter, the positions it lacks are skipped, so `compare(a, b)` and
/// `compare(b, a)` may examine a different number of segments:
/// `compare("1.0", "1.0.5")` keeps `"1.0"` while `compare("1.0.5", "1.0")`
/// also keeps its first argument. Exact ties keep `a`.
///
/// With `break_on_major` set, differing first segments yield
/// [`Comparison::MajorMismatch`] regardless of the rest.
///
/// # Errors
/// Returns [`Error::MalformedVersion`] if any segment of either version is
/// not a non-negative integer.
pub fn compare(a: &str, b: &str, break_on_major: bool) -> Result<Comparison> {
    let a_parts = split_version(a)?;
    let b_parts = split_version(b)?;

    for (i, a_segment) in a_parts.iter().enumerate() {
        let Some(b_segment) = b_parts.get(i) else {
            continue;
        };

        if i == 0 && break_on_major && a_segment != b_segment {
            return Ok(Comparison::MajorMismatch);
        }

        if a_segment > b_segment {
            return Ok(Comparison::First);
        }
        if a_segment < b_segment {
            return Ok(Comparison::Second);
        }
    }

    Ok(Comparison::First)
}

/// Fold [`compare`] over `versions`, seeded with the first element.
///
/// The first major mismatch ends the fold; later elements are not examined.
///
/// # Errors
/// Returns [`Error::EmptyVersionList`] for an empty slice and
/// [`Error::MalformedVersion`] if a compared version is not numeric.
pub fn newest_from_list<S: AsRef<str>>(versions: &[S], break_on_major: bool) -> Result<Resolution> {
    let (first, rest) = versions.split_first().ok_or(Error::EmptyVersionList)?;

    let mut newest = first.as_ref();
    if rest.is_empty() {
        // A lone version is still validated.
        split_version(newest)?;
    }

    for candidate in rest {
        let candidate = candidate.as_ref();
        match compare(newest, candidate, break_on_major)? {
            Comparison::First => {}
            Comparison::Second => newest = candidate,
            Comparison::MajorMismatch => {
                return Ok(Resolution::Unresolvable(MajorConflict {
                    kept: newest.to_string(),
                    candidate: candidate.to_string(),
                }));
            }
        }
    }

    Ok(Resolution::Resolved {
        version: newest.to_string(),
    })
}
