//! Native-bridge detection for installed packages.
//!
//! A package is native when any source file under its installed directory,
//! filtered to a fixed set of extensions, matches a signature naming one of
//! the native-module base classes or protocols.

use crate::{Result, ScanError};
use futures::stream::{self, StreamExt};
use lockstep_fs::{DiscoveryOptions, FileSystem};
use regex::bytes::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Extensions scanned by default: JavaScript, TypeScript, TSX, Kotlin script,
/// Java, Objective-C implementation and header, Swift.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "ts", "tsx", "kts", "java", "m", "h", "swift"];

/// Base classes and protocols that mark a native module.
pub const DEFAULT_SIGNATURE: &str =
    "ReactContextBaseJavaModule|RCTBridgeModule|ReactPackage|NativeModule";

/// Default number of packages scanned at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 16;

/// Scanner configuration.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root install directory, relative to the project root
    pub install_dir: PathBuf,
    /// File extensions to read, without leading dot
    pub extensions: Vec<String>,
    /// Regular expression matched against file contents
    pub signature: String,
    /// Maximum number of packages scanned concurrently
    pub max_concurrent: usize,
    /// Files larger than this are skipped
    pub max_file_size: Option<u64>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from("node_modules"),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            signature: DEFAULT_SIGNATURE.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            max_file_size: Some(10 * 1024 * 1024),
        }
    }
}

/// Classifies installed packages as native or not.
pub struct NativeModuleScanner<F: FileSystem> {
    fs: Arc<F>,
    install_dir: PathBuf,
    extensions: Vec<String>,
    signature: Regex,
    max_concurrent: usize,
    discovery: DiscoveryOptions,
}

impl<F: FileSystem> NativeModuleScanner<F> {
    /// Build a scanner over `fs`.
    ///
    /// # Errors
    /// Fails if the signature does not compile or the concurrency limit is zero.
    pub fn new(fs: Arc<F>, options: ScanOptions) -> Result<Self> {
        if options.max_concurrent == 0 {
            return Err(ScanError::ZeroConcurrency);
        }
        let signature = Regex::new(&options.signature)?;

        Ok(Self {
            fs,
            install_dir: options.install_dir,
            extensions: options
                .extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            signature,
            max_concurrent: options.max_concurrent,
            discovery: DiscoveryOptions {
                max_file_size: options.max_file_size,
                ..DiscoveryOptions::default()
            },
        })
    }

    /// Installed directory of `package` under the root install location.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.install_dir.join(package)
    }

    /// Whether `package` contains a native-bridge signature.
    ///
    /// A missing directory, a package without matching files, and any I/O
    /// failure all classify as `false`. Failures are logged.
    pub async fn classify(&self, package: &str) -> bool {
        match self.try_classify(package).await {
            Ok(native) => native,
            Err(e) => {
                warn!(package, error = %e, "scan failed, treating package as non-native");
                false
            }
        }
    }

    /// Like [`classify`](Self::classify) but surfaces I/O errors.
    ///
    /// # Errors
    /// Returns [`ScanError::Io`] if the directory walk or a file read fails.
    pub async fn try_classify(&self, package: &str) -> Result<bool> {
        let dir = self.package_dir(package);

        let meta = self.fs.metadata(&dir).await.map_err(io_error(&dir))?;
        if !meta.is_dir {
            debug!(package, "not installed at root, skipping scan");
            return Ok(false);
        }

        let extensions: Vec<&str> = self.extensions.iter().map(String::as_str).collect();
        let mut files: Vec<PathBuf> = self
            .fs
            .discover_files(&dir, &extensions, &self.discovery)
            .await
            .map_err(io_error(&dir))?
            .into_iter()
            .collect();
        files.sort();

        for file in &files {
            let content = self.fs.read(file).await.map_err(io_error(file))?;
            if let Some(found) = self.signature.find(&content) {
                debug!(
                    package,
                    file = %file.display(),
                    signature = %String::from_utf8_lossy(found.as_bytes()),
                    "native-bridge signature found"
                );
                return Ok(true);
            }
        }

        trace!(package, files = files.len(), "no native-bridge signature");
        Ok(false)
    }

    /// Classify every package and return the names that are native.
    ///
    /// At most `max_concurrent` packages are scanned at a time. Each scan
    /// only reads its own package directory; results are gathered once every
    /// scan has finished, so the output does not depend on completion order.
    pub async fn classify_all<S: AsRef<str>>(&self, packages: &[S]) -> BTreeSet<String> {
        let names = packages.iter().map(|p| p.as_ref().to_string());
        let results: Vec<(String, bool)> = stream::iter(names)
            .map(|package| async move {
                let native = self.classify(&package).await;
                (package, native)
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let native: BTreeSet<String> = results
            .into_iter()
            .filter_map(|(package, native)| native.then_some(package))
            .collect();

        debug!(
            scanned = packages.len(),
            native = native.len(),
            "native module scan complete"
        );
        native
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ScanError {
    let path = path.to_path_buf();
    move |source| ScanError::Io { path, source }
}
