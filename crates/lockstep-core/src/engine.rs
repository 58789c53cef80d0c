//! The analysis pipeline.
//!
//! ```text
//! lockfile ──► index ──┬──► duplicates ──┐
//!                      │                 ├──► native ∩ duplicates ──► resolve ──► pin
//!                      └──► scan ────────┘
//!                             └──► hoisting audit
//! ```
//!
//! The lockfile and manifest are read and validated before any package is
//! scanned, so a malformed input aborts the run before any write.

use crate::types::{AnalysisReport, PeerDeclaration, RunMode, Statistics};
use crate::Result;
use lockstep_config::LockstepConfig;
use lockstep_deps::{
    apply_resolutions, conflict, LockfileParser, PackageJsonStore, PackageManifest,
    YarnLockfileParser,
};
use lockstep_fs::FileSystem;
use lockstep_native::{HoistAuditor, NativeModuleScanner};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Runs lockstep over one project.
pub struct Analyzer<F: FileSystem> {
    fs: Arc<F>,
    config: LockstepConfig,
}

impl<F: FileSystem> Analyzer<F> {
    /// Create an analyzer for the project `fs` is scoped to.
    pub fn new(fs: Arc<F>, config: LockstepConfig) -> Self {
        Self { fs, config }
    }

    /// The configuration in use
    pub fn config(&self) -> &LockstepConfig {
        &self.config
    }

    /// Run the full analysis.
    ///
    /// # Errors
    ///
    /// Fails if the lockfile has no entries or can't be read, if the manifest
    /// is not valid, if the scan configuration is invalid, or if writing the
    /// manifest fails. Nothing is written when an error is returned before
    /// the final step.
    pub async fn run(&self, mode: RunMode) -> Result<AnalysisReport> {
        let started = Instant::now();
        let paths = &self.config.paths;

        let index = YarnLockfileParser::new()
            .parse_lockfile(self.fs.as_ref(), &paths.lockfile)
            .await?;

        let store = PackageJsonStore::new(&paths.manifest);
        let manifest = store.load(self.fs.as_ref()).await?;

        let scanner = NativeModuleScanner::new(self.fs.clone(), self.config.scan_options())?;

        let duplicates = conflict::find_duplicates(&index);
        let names: Vec<&str> = index.names().map(String::as_str).collect();
        let native_packages = scanner.classify_all(&names).await;
        info!(
            scanned = names.len(),
            native = native_packages.len(),
            "native module scan finished"
        );

        let native_duplicates: BTreeSet<String> = native_packages
            .iter()
            .filter(|name| duplicates.contains(name))
            .cloned()
            .collect();

        let auditor = HoistAuditor::new(self.fs.clone(), &paths.install_dir);
        let not_hoisted = auditor.audit_hoisting(&native_packages).await;
        if !not_hoisted.is_empty() {
            warn!(
                count = not_hoisted.len(),
                "native packages not found in root install directory"
            );
        }

        let mut report = AnalysisReport {
            mode,
            statistics: Statistics {
                total_packages: duplicates.total_packages,
                duplicate_packages: duplicates.duplicate_count(),
                native_packages: native_packages.len(),
                duration_ms: 0,
            },
            duplicates: duplicates.packages.clone(),
            native_packages,
            not_hoisted,
            ..AnalysisReport::default()
        };

        if !native_duplicates.is_empty() {
            info!(count = native_duplicates.len(), "duplicated native packages found");

            let duplicated: Vec<&str> = native_duplicates.iter().map(String::as_str).collect();
            let record =
                conflict::resolve(&duplicated, &index, self.config.resolve.break_on_major);
            let merge = apply_resolutions(manifest.resolutions.as_ref(), &record);

            if mode == RunMode::Write && merge.changed {
                store
                    .save_resolutions(self.fs.as_ref(), &manifest, &merge.overrides)
                    .await?;
                report.manifest_changed = true;
            }

            if record.needs_attention() {
                warn!(
                    unresolvable = record.unresolvable.len(),
                    invalid = record.invalid.len(),
                    "some packages cannot be automatically resolved"
                );
            }

            report.peer_declarations = peer_declarations(&manifest, &native_duplicates, &record);
            report.creates_resolutions = manifest.resolutions.is_none();
            report.pin_changes = merge.applied;
            report.resolutions = record;
        }

        report.native_duplicates = native_duplicates;
        report.statistics.duration_ms = started.elapsed().as_millis() as u64;
        Ok(report)
    }
}

fn peer_declarations(
    manifest: &PackageManifest,
    packages: &BTreeSet<String>,
    record: &lockstep_deps::ResolutionRecord,
) -> Vec<PeerDeclaration> {
    packages
        .iter()
        .filter_map(|package| {
            manifest
                .peer_dependencies
                .get(package)
                .map(|range| PeerDeclaration {
                    package: package.clone(),
                    declared_range: range.clone(),
                    resolved: record.resolved.get(package).cloned(),
                })
        })
        .collect()
}
