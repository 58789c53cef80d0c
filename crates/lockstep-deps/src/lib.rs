//! # lockstep-deps
//!
//! Lockfile analysis for JavaScript dependency trees.
//!
//! This crate provides functionality to:
//! - Parse a yarn lockfile into a [`PackageVersionIndex`]
//! - Compare dotted-numeric versions, treating a major-version change as unresolvable
//! - Find packages installed at more than one version and pick one version for each
//! - Merge the chosen versions into a `package.json` `resolutions` map and write it back atomically
//!
//! ## Example
//!
//! ```rust
//! use lockstep_deps::{conflict, LockfileParser, YarnLockfileParser};
//!
//! # fn main() -> lockstep_deps::Result<()> {
//! let lock = "lodash@^4.17.0:\n  version \"4.17.21\"\n\nlodash@4.17.15:\n  version \"4.17.15\"\n";
//! let index = YarnLockfileParser::new().parse(lock)?;
//!
//! let duplicates = conflict::find_duplicates(&index);
//! let record = conflict::resolve(&duplicates.packages, &index, true);
//! assert_eq!(record.resolved["lodash"], "4.17.21");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod conflict;
pub mod error;
pub mod lockfile;
pub mod manifest;
pub mod types;
pub mod update;
pub mod version;

pub use error::{Error, Result};
pub use lockfile::{LockfileParser, YarnLockfileParser};
pub use manifest::{apply_resolutions, PackageJsonStore, PackageManifest};
pub use types::{
    AppliedPin, DuplicateSummary, PackageVersionIndex, ResolutionMerge, ResolutionRecord,
};
pub use version::{compare, newest_from_list, Comparison, MajorConflict, Resolution};
