//! Hoisting audit: are flagged packages installed at the root?

use lockstep_fs::FileSystem;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Checks packages against the root install location.
pub struct HoistAuditor<F: FileSystem> {
    fs: Arc<F>,
    install_dir: PathBuf,
}

impl<F: FileSystem> HoistAuditor<F> {
    /// Audit against `install_dir` (relative to the project root).
    pub fn new(fs: Arc<F>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            install_dir: install_dir.into(),
        }
    }

    /// Whether `package` has a directory at the root install location.
    ///
    /// A symlinked directory counts. Unreadable paths count as missing.
    pub async fn is_hoisted(&self, package: &str) -> bool {
        let dir = self.install_dir.join(package);
        match self.fs.metadata(&dir).await {
            Ok(meta) => meta.is_dir,
            Err(e) => {
                warn!(package, error = %e, "cannot stat package directory");
                false
            }
        }
    }

    /// Return the packages in `flagged` that are not installed at the root.
    pub async fn audit_hoisting(&self, flagged: &BTreeSet<String>) -> BTreeSet<String> {
        let mut missing = BTreeSet::new();
        for package in flagged {
            if !self.is_hoisted(package).await {
                debug!(package = %package, "not hoisted to root install directory");
                missing.insert(package.clone());
            }
        }
        missing
    }
}
