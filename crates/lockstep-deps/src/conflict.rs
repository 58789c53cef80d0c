//! Duplicate detection and version conflict resolution

use crate::version::{newest_from_list, Resolution};
use crate::{DuplicateSummary, PackageVersionIndex, ResolutionRecord};
use tracing::{info, warn};

/// Find packages installed at more than one version.
pub fn find_duplicates(index: &PackageVersionIndex) -> DuplicateSummary {
    let packages: Vec<String> = index
        .iter()
        .filter(|(_, versions)| versions.len() > 1)
        .map(|(name, _)| name.clone())
        .collect();

    info!(
        duplicates = packages.len(),
        total = index.len(),
        "Found {} duplicate package versions out of {}",
        packages.len(),
        index.len()
    );

    DuplicateSummary {
        packages,
        total_packages: index.len(),
    }
}

/// Pick a single version for each package in `duplicates`.
///
/// A major-version mismatch or an unparseable version only affects the
/// package it belongs to; every other package is still resolved. Names that
/// are missing from `index` or have a single version are skipped.
pub fn resolve<S: AsRef<str>>(
    duplicates: &[S],
    index: &PackageVersionIndex,
    break_on_major: bool,
) -> ResolutionRecord {
    let mut record = ResolutionRecord::default();

    for name in duplicates {
        let name = name.as_ref();
        let Some(versions) = index.versions(name) else {
            continue;
        };
        if versions.len() < 2 {
            continue;
        }

        let versions: Vec<&str> = versions.iter().map(String::as_str).collect();
        match newest_from_list(&versions, break_on_major) {
            Ok(Resolution::Resolved { version }) => {
                record.resolved.insert(name.to_string(), version);
            }
            Ok(Resolution::Unresolvable(conflict)) => {
                warn!(
                    package = name,
                    "{} major versions {} and {} are unresolvable",
                    name,
                    conflict.kept,
                    conflict.candidate
                );
                record.unresolvable.insert(name.to_string(), conflict);
            }
            Err(e) => {
                warn!(package = name, error = %e, "cannot compare versions");
                record.invalid.insert(name.to_string(), e.to_string());
            }
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> PackageVersionIndex {
        [
            ("lodash", vec!["4.17.21", "4.17.15"]),
            ("react", vec!["18.2.0"]),
            ("react-native-svg", vec!["12.1.0", "13.4.0"]),
            ("weird", vec!["1.0.0", "1.0.0-rc.1"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_find_duplicates() {
        let index: PackageVersionIndex = [
            ("lodash", vec!["4.17.21", "4.17.15"]),
            ("react", vec!["18.2.0"]),
        ]
        .into_iter()
        .collect();

        let summary = find_duplicates(&index);
        assert_eq!(summary.packages, vec!["lodash".to_string()]);
        assert_eq!(summary.total_packages, 2);
        assert_eq!(summary.duplicate_count(), 1);
    }

    #[test]
    fn test_resolve_splits_outcomes() {
        let index = index();
        let summary = find_duplicates(&index);
        assert_eq!(summary.packages, vec!["lodash", "react-native-svg", "weird"]);

        let record = resolve(&summary.packages, &index, true);
        assert_eq!(record.resolved.get("lodash").map(String::as_str), Some("4.17.21"));
        assert!(record.unresolvable.contains_key("react-native-svg"));
        assert!(record.invalid.contains_key("weird"));
        assert!(record.needs_attention());

        // Each package appears in exactly one bucket.
        assert!(!record.resolved.contains_key("react-native-svg"));
        assert!(!record.resolved.contains_key("weird"));
    }

    #[test]
    fn test_resolve_across_majors_when_allowed() {
        let index = index();
        let record = resolve(&["react-native-svg"], &index, false);
        assert_eq!(
            record.resolved.get("react-native-svg").map(String::as_str),
            Some("13.4.0")
        );
        assert!(!record.needs_attention());
    }

    #[test]
    fn test_resolve_skips_unknown_and_single_version_packages() {
        let index = index();
        let record = resolve(&["react", "not-installed"], &index, true);
        assert!(record.resolved.is_empty());
        assert!(!record.needs_attention());
    }
}
