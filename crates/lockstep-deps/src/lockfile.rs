//! yarn.lock parser
//!
//! The parser works line by line over the block layout of a yarn lockfile:
//!
//! ```text
//! lodash@^4.17.0, lodash@^4.17.5:
//!   version "4.17.21"
//!   dependencies:
//!     ...
//! "@babel/core@^7.0.0":
//!   version "7.20.0"
//! ```
//!
//! Only package names and resolved versions are extracted. Nested dependency
//! blocks are skipped because their headers mention `dependencies`.

use crate::{Error, PackageVersionIndex, Result};
use lockstep_fs::FileSystem;
use std::path::Path;
use tracing::{debug, trace};

/// Trait for building a [`PackageVersionIndex`] from lockfile text
#[async_trait::async_trait]
pub trait LockfileParser: Send + Sync {
    /// Parse lockfile text into a version index.
    ///
    /// # Errors
    /// Returns [`Error::MalformedLockfile`] if no package entry is found.
    fn parse(&self, text: &str) -> Result<PackageVersionIndex>;

    /// Read and parse a lockfile through `fs`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn parse_lockfile<F: FileSystem>(&self, fs: &F, path: &Path) -> Result<PackageVersionIndex> {
        let content = fs.read_to_string(path).await?;
        self.parse(&content).map_err(|e| match e {
            Error::MalformedLockfile(reason) => {
                Error::MalformedLockfile(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })
    }
}

/// yarn.lock parser
#[derive(Debug, Default, Clone, Copy)]
pub struct YarnLockfileParser;

impl YarnLockfileParser {
    /// Create a new yarn lockfile parser
    pub fn new() -> Self {
        Self
    }
}

/// Extract the package name from a block header such as
/// `lodash@^4.17.0, lodash@^4.17.5:` or `"@babel/core@^7.0.0":`.
fn package_name_from_header(line: &str) -> Option<String> {
    let unquoted = line.replace('"', "");
    let mut parts = unquoted.split('@');
    let first = parts.next()?;

    let name = if first.is_empty() {
        // Leading `@` means a scoped package.
        format!("@{}", parts.next()?)
    } else {
        first.to_string()
    };

    let name = name.trim_end_matches(':').trim();
    if name.is_empty() || name == "@" {
        return None;
    }
    Some(name.to_string())
}

/// Extract the version from a `version "4.17.21"` (or `version: 4.17.21`) line.
fn version_from_line(line: &str) -> Option<String> {
    let unquoted = line.replace('"', "");
    unquoted.split_whitespace().nth(1).map(str::to_string)
}

fn is_package_header(line: &str) -> bool {
    line.ends_with(':') && !line.to_ascii_lowercase().contains("dependencies")
}

impl LockfileParser for YarnLockfileParser {
    fn parse(&self, text: &str) -> Result<PackageVersionIndex> {
        let mut index = PackageVersionIndex::default();
        let mut current: Option<String> = None;

        for line in text.lines() {
            let line = line.trim();

            if is_package_header(line) {
                current = package_name_from_header(line);
                if let Some(name) = &current {
                    index.register(name);
                }
            } else if line.starts_with("version") {
                let Some(version) = version_from_line(line) else {
                    continue;
                };
                match &current {
                    Some(name) => {
                        index.add_version(name, &version);
                    }
                    None => trace!(version = %version, "version line outside a package block"),
                }
            }
        }

        if index.is_empty() {
            return Err(Error::MalformedLockfile(
                "no package entries found".to_string(),
            ));
        }

        debug!(packages = index.len(), "parsed lockfile");
        Ok(index)
    }
}
