use lockstep_native::{ScanOptions, DEFAULT_EXTENSIONS, DEFAULT_MAX_CONCURRENT, DEFAULT_SIGNATURE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project configuration, read from `lockstep.toml` at the project root.
///
/// Every section is optional; missing keys take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LockstepConfig {
    /// Where the lockfile, manifest and install directory live
    #[serde(default)]
    pub paths: PathsConfig,

    /// Native module scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Version resolution settings
    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl LockstepConfig {
    /// Scanner options derived from this config.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            install_dir: self.paths.install_dir.clone(),
            extensions: self.scan.extensions.clone(),
            signature: self.scan.signature.clone(),
            max_concurrent: self.scan.max_concurrent,
            max_file_size: self.scan.max_file_size,
        }
    }
}

/// Paths relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Lockfile to analyze
    #[serde(default = "default_lockfile")]
    pub lockfile: PathBuf,

    /// Manifest holding the `resolutions` map
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Root install location
    #[serde(default = "default_install_dir")]
    pub install_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            lockfile: default_lockfile(),
            manifest: default_manifest(),
            install_dir: default_install_dir(),
        }
    }
}

/// Native module scan settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Extensions of files to read, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Regular expression identifying native-bridge code
    #[serde(default = "default_signature")]
    pub signature: String,

    /// Packages scanned at once
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Skip files larger than this many bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            signature: default_signature(),
            max_concurrent: default_max_concurrent(),
            max_file_size: default_max_file_size(),
        }
    }
}

/// Version resolution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Treat a major-version difference as unresolvable
    #[serde(default = "default_true")]
    pub break_on_major: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            break_on_major: default_true(),
        }
    }
}

// Default value functions
fn default_lockfile() -> PathBuf {
    PathBuf::from("yarn.lock")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_install_dir() -> PathBuf {
    PathBuf::from("node_modules")
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_signature() -> String {
    DEFAULT_SIGNATURE.to_string()
}

fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT
}

fn default_max_file_size() -> Option<u64> {
    Some(10 * 1024 * 1024)
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LockstepConfig::default();
        assert_eq!(config.paths.lockfile, PathBuf::from("yarn.lock"));
        assert_eq!(config.paths.manifest, PathBuf::from("package.json"));
        assert_eq!(config.paths.install_dir, PathBuf::from("node_modules"));
        assert_eq!(config.scan.extensions.len(), 8);
        assert_eq!(config.scan.max_concurrent, 16);
        assert!(config.resolve.break_on_major);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LockstepConfig = toml::from_str(
            r#"
[scan]
max_concurrent = 4

[resolve]
break_on_major = false
"#,
        )
        .unwrap();

        assert_eq!(config.scan.max_concurrent, 4);
        assert_eq!(config.scan.signature, DEFAULT_SIGNATURE);
        assert!(!config.resolve.break_on_major);
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<LockstepConfig, _> = toml::from_str("[scan]\nthreads = 4\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = LockstepConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: LockstepConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_scan_options() {
        let mut config = LockstepConfig::default();
        config.paths.install_dir = PathBuf::from("app/node_modules");
        config.scan.max_concurrent = 2;

        let options = config.scan_options();
        assert_eq!(options.install_dir, PathBuf::from("app/node_modules"));
        assert_eq!(options.max_concurrent, 2);
        assert_eq!(options.signature, DEFAULT_SIGNATURE);
    }
}
