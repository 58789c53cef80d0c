//! FileSystem trait used by the lockfile, manifest and package scanners.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Metadata for a path inside the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Whether the path exists (after following symlinks).
    pub exists: bool,
    /// Whether the path resolves to a regular file.
    pub is_file: bool,
    /// Whether the path resolves to a directory.
    ///
    /// Workspace packages are usually linked into the install directory, so a
    /// symlink to a directory counts.
    pub is_dir: bool,
    /// Size in bytes (0 for directories or missing paths).
    pub size: u64,
}

impl FileMetadata {
    pub(crate) fn missing() -> Self {
        Self {
            exists: false,
            is_file: false,
            is_dir: false,
            size: 0,
        }
    }
}

/// Options for walking an installed package tree.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Files larger than this are skipped (bytes).
    pub max_file_size: Option<u64>,

    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,

    /// Maximum directory depth below the walk root.
    pub max_depth: usize,

    /// Include dot-files and dot-directories.
    pub include_hidden: bool,

    /// Honour `.gitignore` files found during the walk.
    ///
    /// Installed packages often ship a `.gitignore` that hides their own
    /// native sources, so this is off by default.
    pub respect_gitignore: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_file_size: Some(10 * 1024 * 1024),
            follow_symlinks: false,
            max_depth: 100,
            include_hidden: false,
            respect_gitignore: false,
        }
    }
}

/// Project-scoped filesystem access.
///
/// All methods are async: the native implementation pushes blocking `std::fs`
/// work onto tokio's blocking pool so many package walks can be in flight at
/// once without stalling the runtime.
///
/// Errors are plain `std::io::Error`. Paths that escape the project root fail
/// with `io::ErrorKind::PermissionDenied`.
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync {
    /// Check if a path exists.
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Read file contents as a string.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::NotFound` if file doesn't exist.
    /// Returns `io::ErrorKind::InvalidData` if file is not valid UTF-8.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Read file contents as bytes.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Get metadata for a path.
    ///
    /// A missing path is not an error; it yields `exists == false`.
    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Write string contents to a file, replacing it if present.
    ///
    /// Parent directories are not created.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Rename a file. Used for write-to-temp-then-rename updates.
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Discover files below `root` whose extension is in `extensions`.
    ///
    /// Extensions are given without the leading dot (`"js"`, `"swift"`).
    /// Returns absolute paths.
    async fn discover_files(
        &self,
        root: &Path,
        extensions: &[&str],
        options: &DiscoveryOptions,
    ) -> io::Result<HashSet<PathBuf>>;

    /// Get the project root this filesystem is scoped to.
    fn project_root(&self) -> &Path;
}
