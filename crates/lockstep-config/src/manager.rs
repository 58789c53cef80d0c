use crate::types::LockstepConfig;
use lockstep_fs::FileSystem;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Default config file name, looked up at the project root
pub const CONFIG_FILE_NAME: &str = "lockstep.toml";

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error in {path}: {source}")]
    TomlDe {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Config file already exists at {0}")]
    ConfigExists(PathBuf),

    #[error("Invalid scan.signature: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("scan.max_concurrent must be at least 1")]
    InvalidConcurrency,

    #[error("scan.extensions must not be empty")]
    NoExtensions,
}

/// Loads and writes a project's `lockstep.toml`
pub struct ConfigManager<F: FileSystem> {
    fs: Arc<F>,
    config_path: PathBuf,
    config: LockstepConfig,
}

impl<F: FileSystem> ConfigManager<F> {
    /// Load config from `path`, which must exist.
    pub async fn load_from(fs: Arc<F>, path: &Path) -> Result<Self, ConfigError> {
        if !fs.exists(path).await? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = fs.read_to_string(path).await?;
        let config: LockstepConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::TomlDe {
                path: path.to_path_buf(),
                source,
            })?;
        validate(&config)?;
        debug!(path = %path.display(), "loaded config");

        Ok(Self {
            fs,
            config_path: path.to_path_buf(),
            config,
        })
    }

    /// Load config from `path`, or fall back to defaults if it doesn't exist.
    pub async fn load_or_default(fs: Arc<F>, path: &Path) -> Result<Self, ConfigError> {
        match Self::load_from(fs.clone(), path).await {
            Err(ConfigError::ConfigNotFound(_)) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self {
                    fs,
                    config_path: path.to_path_buf(),
                    config: LockstepConfig::default(),
                })
            }
            other => other,
        }
    }

    /// Write a default config to `path`. Refuses to overwrite.
    pub async fn init_at(fs: Arc<F>, path: &Path) -> Result<Self, ConfigError> {
        if fs.exists(path).await? {
            return Err(ConfigError::ConfigExists(path.to_path_buf()));
        }

        let manager = Self {
            fs,
            config_path: path.to_path_buf(),
            config: LockstepConfig::default(),
        };
        manager.save().await?;
        Ok(manager)
    }

    /// Save config to disk atomically
    ///
    /// Uses a temporary file and atomic rename to prevent corruption
    pub async fn save(&self) -> Result<(), ConfigError> {
        validate(&self.config)?;
        let toml_str = toml::to_string_pretty(&self.config)?;

        let temp_path = self.config_path.with_extension("toml.tmp");
        self.fs.write(&temp_path, &toml_str).await?;
        self.fs.rename(&temp_path, &self.config_path).await?;

        Ok(())
    }

    /// Get reference to config
    pub fn config(&self) -> &LockstepConfig {
        &self.config
    }

    /// Consume the manager, keeping only the config
    pub fn into_config(self) -> LockstepConfig {
        self.config
    }
}

/// Check values serde can't: the signature must compile, concurrency must be
/// positive and there must be something to scan.
pub fn validate(config: &LockstepConfig) -> Result<(), ConfigError> {
    regex::bytes::Regex::new(&config.scan.signature)?;
    if config.scan.max_concurrent == 0 {
        return Err(ConfigError::InvalidConcurrency);
    }
    if config.scan.extensions.is_empty() {
        return Err(ConfigError::NoExtensions);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_fs::NativeFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, Arc<NativeFileSystem>) {
        let temp_dir = TempDir::new().unwrap();
        let fs = Arc::new(NativeFileSystem::new(temp_dir.path()).unwrap());
        (temp_dir, fs)
    }

    #[tokio::test]
    async fn test_load_or_default_without_file() {
        let (_temp_dir, fs) = project();
        let manager = ConfigManager::load_or_default(fs, Path::new(CONFIG_FILE_NAME))
            .await
            .unwrap();
        assert_eq!(manager.config(), &LockstepConfig::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let (temp_dir, fs) = project();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[paths]\nlockfile = \"mobile/yarn.lock\"\n",
        )
        .unwrap();

        let manager = ConfigManager::load_from(fs, Path::new(CONFIG_FILE_NAME))
            .await
            .unwrap();
        assert_eq!(
            manager.config().paths.lockfile,
            PathBuf::from("mobile/yarn.lock")
        );
    }

    #[tokio::test]
    async fn test_load_from_missing_file() {
        let (_temp_dir, fs) = project();
        let result = ConfigManager::load_from(fs, Path::new(CONFIG_FILE_NAME)).await;
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let (temp_dir, fs) = project();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        fs::write(&path, "[scan]\nsignature = \"(unclosed\"\n").unwrap();
        let result = ConfigManager::load_from(fs.clone(), &path).await;
        assert!(matches!(result, Err(ConfigError::InvalidPattern(_))));

        fs::write(&path, "[scan]\nmax_concurrent = 0\n").unwrap();
        let result = ConfigManager::load_from(fs.clone(), &path).await;
        assert!(matches!(result, Err(ConfigError::InvalidConcurrency)));

        fs::write(&path, "[scan\n").unwrap();
        let result = ConfigManager::load_from(fs, &path).await;
        assert!(matches!(result, Err(ConfigError::TomlDe { .. })));
    }

    #[tokio::test]
    async fn test_init_writes_defaults_once() {
        let (temp_dir, fs) = project();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        ConfigManager::init_at(fs.clone(), &path).await.unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("lockstep.toml.tmp").exists());

        let reloaded = ConfigManager::load_from(fs.clone(), &path).await.unwrap();
        assert_eq!(reloaded.config(), &LockstepConfig::default());

        let again = ConfigManager::init_at(fs, &path).await;
        assert!(matches!(again, Err(ConfigError::ConfigExists(_))));
    }
}
