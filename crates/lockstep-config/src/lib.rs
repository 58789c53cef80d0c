pub mod manager;
pub mod types;

pub use manager::{validate, ConfigError, ConfigManager, CONFIG_FILE_NAME};
pub use types::{LockstepConfig, PathsConfig, ResolveConfig, ScanConfig};
