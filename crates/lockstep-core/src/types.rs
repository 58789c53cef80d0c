//! Report types produced by a lockstep run.

use lockstep_deps::{AppliedPin, ResolutionRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// Whether a run may modify the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Analyze and report planned pin changes without writing
    #[default]
    ReportOnly,
    /// Write changed pins back to the manifest
    Write,
}

/// A duplicated native package the manifest also declares as a peer.
///
/// Pinning such a package overrides what consumers of the project expect, so
/// it is surfaced for a human to confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerDeclaration {
    /// Package name
    pub package: String,
    /// Range declared under `peerDependencies`
    pub declared_range: String,
    /// Version the run resolved the package to, if any
    pub resolved: Option<String>,
}

/// Counts and timing for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Distinct packages in the lockfile
    pub total_packages: usize,
    /// Packages installed at more than one version
    pub duplicate_packages: usize,
    /// Packages whose sources contain a native-bridge signature
    pub native_packages: usize,
    /// Wall-clock time of the run in milliseconds
    pub duration_ms: u64,
}

/// Everything a run found and did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Mode the run was executed in
    pub mode: RunMode,
    /// Summary counts
    pub statistics: Statistics,
    /// All duplicated packages, in name order
    pub duplicates: Vec<String>,
    /// Packages flagged as native
    pub native_packages: BTreeSet<String>,
    /// Native packages that are also duplicated
    pub native_duplicates: BTreeSet<String>,
    /// Native packages missing from the root install location
    pub not_hoisted: BTreeSet<String>,
    /// Chosen, unresolvable and invalid versions for the native duplicates
    pub resolutions: ResolutionRecord,
    /// Pins added or changed (applied in write mode, planned otherwise)
    pub pin_changes: Vec<AppliedPin>,
    /// Whether the manifest lacks a `resolutions` map and one would be created
    pub creates_resolutions: bool,
    /// Whether the manifest file was rewritten
    pub manifest_changed: bool,
    /// Native duplicates the manifest declares as peers
    pub peer_declarations: Vec<PeerDeclaration>,
}

impl AnalysisReport {
    /// Nothing is duplicated among native packages and every native package
    /// is hoisted.
    pub fn no_action_needed(&self) -> bool {
        self.native_duplicates.is_empty() && self.not_hoisted.is_empty()
    }

    /// Some conflicts need a human decision.
    pub fn has_unresolvable(&self) -> bool {
        self.resolutions.needs_attention()
    }

    /// The run found pin changes but did not write them.
    pub fn has_pending_changes(&self) -> bool {
        !self.manifest_changed && (!self.pin_changes.is_empty() || self.creates_resolutions)
    }
}
