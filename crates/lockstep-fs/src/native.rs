//! Native filesystem implementation using std::fs + tokio.

use crate::{DiscoveryOptions, FileMetadata, FileSystem};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::task;

/// Native filesystem scoped to a project root.
///
/// Blocking `std::fs` calls are wrapped in `tokio::task::spawn_blocking`.
#[derive(Debug, Clone)]
pub struct NativeFileSystem {
    project_root: PathBuf,
}

impl NativeFileSystem {
    /// Create a filesystem scoped to `project_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root doesn't exist or can't be canonicalized.
    pub fn new(project_root: impl AsRef<Path>) -> io::Result<Self> {
        let root = project_root.as_ref();
        let project_root = root.canonicalize().map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Project root {} is not accessible: {}", root.display(), e),
            )
        })?;

        Ok(Self { project_root })
    }

    /// Resolve `path` against the project root and refuse anything outside it.
    ///
    /// Existing paths are canonicalized, so a symlink is judged by its
    /// target. Missing paths are normalized syntactically.
    fn validate_path(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        };

        let resolved = match absolute.canonicalize() {
            Ok(canonical) => canonical,
            Err(_) => match (absolute.parent(), absolute.file_name()) {
                (Some(parent), Some(name)) => match parent.canonicalize() {
                    Ok(canonical_parent) => canonical_parent.join(name),
                    Err(_) => normalize_lexically(&absolute),
                },
                _ => normalize_lexically(&absolute),
            },
        };

        if !resolved.starts_with(&self.project_root) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!(
                    "Path traversal detected: {} is outside project root {}",
                    resolved.display(),
                    self.project_root.display()
                ),
            ));
        }

        Ok(resolved)
    }
}

/// Remove `.` and `..` components without touching the disk.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                result = PathBuf::from(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(name) => result.push(name),
        }
    }
    result
}

fn join_error(e: task::JoinError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

#[async_trait::async_trait]
impl FileSystem for NativeFileSystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        let validated = self.validate_path(path)?;
        task::spawn_blocking(move || Ok(validated.exists()))
            .await
            .map_err(join_error)?
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let validated = self.validate_path(path)?;
        task::spawn_blocking(move || std::fs::read_to_string(&validated))
            .await
            .map_err(join_error)?
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let validated = self.validate_path(path)?;
        task::spawn_blocking(move || std::fs::read(&validated))
            .await
            .map_err(join_error)?
    }

    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let validated = match self.validate_path(path) {
            Ok(validated) => validated,
            // A dangling link can't be validated; treat it as not installed.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(FileMetadata::missing()),
            Err(e) => return Err(e),
        };

        task::spawn_blocking(move || match std::fs::metadata(&validated) {
            Ok(meta) => Ok(FileMetadata {
                exists: true,
                is_file: meta.is_file(),
                is_dir: meta.is_dir(),
                size: if meta.is_file() { meta.len() } else { 0 },
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileMetadata::missing()),
            Err(e) => Err(e),
        })
        .await
        .map_err(join_error)?
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let validated = self.validate_path(path)?;
        let contents = contents.to_string();
        task::spawn_blocking(move || std::fs::write(&validated, contents))
            .await
            .map_err(join_error)?
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let from_validated = self.validate_path(from)?;
        let to_validated = self.validate_path(to)?;
        task::spawn_blocking(move || std::fs::rename(&from_validated, &to_validated))
            .await
            .map_err(join_error)?
    }

    async fn discover_files(
        &self,
        root: &Path,
        extensions: &[&str],
        options: &DiscoveryOptions,
    ) -> io::Result<HashSet<PathBuf>> {
        let validated_root = self.validate_path(root)?;
        let extensions: Vec<String> = extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
        let opts = options.clone();
        let project_root = self.project_root.clone();

        task::spawn_blocking(move || {
            discover_files_sync(&validated_root, &extensions, &opts, &project_root)
        })
        .await
        .map_err(join_error)?
    }

    fn project_root(&self) -> &Path {
        &self.project_root
    }
}

fn discover_files_sync(
    root: &Path,
    extensions: &[String],
    options: &DiscoveryOptions,
    project_root: &Path,
) -> io::Result<HashSet<PathBuf>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Not a directory: {}", root.display()),
        ));
    }

    let mut discovered = HashSet::new();

    let mut walker = WalkBuilder::new(root);
    walker
        .follow_links(options.follow_symlinks)
        .hidden(!options.include_hidden)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .parents(options.respect_gitignore)
        .ignore(options.respect_gitignore)
        .require_git(false)
        .max_depth(Some(options.max_depth))
        .max_filesize(options.max_file_size);

    for result in walker.build() {
        let entry = result.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }

        let path = entry.path();
        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| extensions.iter().any(|wanted| wanted == ext))
            .unwrap_or(false);
        if !matches_extension {
            continue;
        }

        if let Ok(canonical) = path.canonicalize() {
            if canonical.starts_with(project_root) {
                discovered.insert(canonical);
            }
        }
    }

    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/project/a/../b/./c")),
            PathBuf::from("/project/b/c")
        );
        assert_eq!(
            normalize_lexically(Path::new("/project/../../etc")),
            PathBuf::from("/etc")
        );
    }
}
