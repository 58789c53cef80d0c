//! Atomic file replacement

use crate::Result;
use lockstep_fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Replace the contents of `path` in one step.
///
/// Strategy:
/// 1. Write to a temporary sibling (same filesystem, so rename is atomic)
/// 2. Verify contents can be read back
/// 3. Rename over the original
///
/// Readers never observe a half-written file.
///
/// # Errors
/// Returns an error if the file cannot be written or renamed
pub async fn replace_file<F: FileSystem>(fs: &F, path: &Path, new_contents: &str) -> Result<()> {
    let temp_path = temp_path_for(path);
    fs.write(&temp_path, new_contents).await?;

    let written = fs.read_to_string(&temp_path).await?;
    if written != new_contents {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("short write to {}", temp_path.display()),
        )
        .into());
    }

    fs.rename(&temp_path, path).await?;
    debug!(path = %path.display(), bytes = new_contents.len(), "file replaced");

    Ok(())
}

/// `package.json` -> `package.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_fs::NativeFileSystem;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_update_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("package.json");
        let fs = NativeFileSystem::new(temp_dir.path()).unwrap();

        std::fs::write(&file_path, "old content").unwrap();

        replace_file(&fs, &file_path, "new content").await.unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new content");
        assert!(!temp_dir.path().join("package.json.tmp").exists());
    }

    #[test]
    fn test_temp_path_for() {
        assert_eq!(
            temp_path_for(Path::new("/app/package.json")),
            PathBuf::from("/app/package.json.tmp")
        );
    }
}
