//! Core types for lockfile analysis

use crate::version::MajorConflict;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Every package named in a lockfile with the set of versions installed for it.
///
/// Built once per run by a [`LockfileParser`](crate::LockfileParser) and not
/// mutated afterwards. Iteration is ordered by package name, and each
/// version set iterates in string order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageVersionIndex {
    packages: BTreeMap<String, BTreeSet<String>>,
}

impl PackageVersionIndex {
    /// Register a package name with no versions yet.
    pub(crate) fn register(&mut self, name: &str) {
        self.packages.entry(name.to_string()).or_default();
    }

    /// Record a version for a registered package. Unknown names are ignored.
    pub(crate) fn add_version(&mut self, name: &str, version: &str) -> bool {
        match self.packages.get_mut(name) {
            Some(versions) => versions.insert(version.to_string()),
            None => false,
        }
    }

    /// Versions installed for `name`.
    pub fn versions(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.packages.get(name)
    }

    /// Iterate over package names and their versions.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.packages.iter()
    }

    /// Iterate over package names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.packages.keys()
    }

    /// Whether `name` appears in the lockfile.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Number of distinct package names.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the index has no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<N, V, I> FromIterator<(N, I)> for PackageVersionIndex
where
    N: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = V>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let packages = iter
            .into_iter()
            .map(|(name, versions)| {
                (
                    name.into(),
                    versions.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { packages }
    }
}

/// Packages installed at more than one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateSummary {
    /// Duplicated package names, in name order
    pub packages: Vec<String>,
    /// Total number of packages in the index
    pub total_packages: usize,
}

impl DuplicateSummary {
    /// Number of duplicated packages.
    pub fn duplicate_count(&self) -> usize {
        self.packages.len()
    }

    /// Whether `name` is duplicated.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p == name)
    }
}

/// The version chosen for each duplicated package in one run.
///
/// Every package lands in exactly one of the three maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionRecord {
    /// Package name to the single version it should be pinned to
    pub resolved: BTreeMap<String, String>,
    /// Packages whose installed majors disagree; no safe pin exists
    pub unresolvable: BTreeMap<String, MajorConflict>,
    /// Packages with a version the comparator could not parse
    pub invalid: BTreeMap<String, String>,
}

impl ResolutionRecord {
    /// Whether any package needs a human decision.
    pub fn needs_attention(&self) -> bool {
        !self.unresolvable.is_empty() || !self.invalid.is_empty()
    }
}

/// A pin that was added or changed in the override map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedPin {
    /// Package name
    pub package: String,
    /// Previously pinned version, if any
    pub old_version: Option<String>,
    /// Newly pinned version
    pub new_version: String,
}

/// Outcome of merging a [`ResolutionRecord`] into an override map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionMerge {
    /// The full override map after the merge
    pub overrides: BTreeMap<String, String>,
    /// Pins that were added or changed
    pub applied: Vec<AppliedPin>,
    /// Whether the map differs from the input (or had to be created)
    pub changed: bool,
}
