//! Analysis orchestration: config loading, flag overrides and output.

use crate::formatters::{self, Formatter};
use crate::OutputFormat;
use anyhow::{Context, Result};
use lockstep_config::{validate, ConfigManager, LockstepConfig, CONFIG_FILE_NAME};
use lockstep_core::{Analyzer, RunMode};
use lockstep_fs::{FileSystem, NativeFileSystem};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

/// Command-line values that take precedence over `lockstep.toml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub lockfile: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub install_dir: Option<PathBuf>,
    pub concurrency: Option<usize>,
}

impl ConfigOverrides {
    /// Apply the overrides that were given.
    pub fn apply(&self, config: &mut LockstepConfig) {
        if let Some(lockfile) = &self.lockfile {
            config.paths.lockfile = lockfile.clone();
        }
        if let Some(manifest) = &self.manifest {
            config.paths.manifest = manifest.clone();
        }
        if let Some(install_dir) = &self.install_dir {
            config.paths.install_dir = install_dir.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.scan.max_concurrent = concurrency;
        }
    }
}

/// Options for running analysis.
pub struct AnalysisRunOptions {
    pub project_dir: PathBuf,
    pub write: bool,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub format: OutputFormat,
}

/// Runs the analysis with the given options.
pub fn run_analysis(options: &AnalysisRunOptions) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async {
        let fs = Arc::new(NativeFileSystem::new(&options.project_dir).with_context(|| {
            format!(
                "Failed to open project directory {}",
                options.project_dir.display()
            )
        })?);

        let config = load_config(fs.clone(), options.config.as_deref(), &options.overrides).await?;

        let mode = if options.write {
            RunMode::Write
        } else {
            RunMode::ReportOnly
        };
        debug!(?mode, root = %fs.project_root().display(), "starting analysis");

        let report = Analyzer::new(fs, config)
            .run(mode)
            .await
            .context("Analysis failed")?;

        match options.format {
            OutputFormat::Json => formatters::JsonFormatter.format(&report),
            OutputFormat::Human => formatters::HumanFormatter.format(&report),
        }
        Ok(())
    })
}

/// Load the project config, apply flag overrides and re-validate.
///
/// An explicit `--config` path must exist and may live outside the project;
/// the default `lockstep.toml` is optional.
pub async fn load_config(
    project_fs: Arc<NativeFileSystem>,
    explicit: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LockstepConfig> {
    let mut config = match explicit {
        Some(path) => {
            let path = std::path::absolute(path)
                .with_context(|| format!("Invalid config path {}", path.display()))?;
            let dir = path.parent().unwrap_or_else(|| Path::new("/"));
            let config_fs = Arc::new(NativeFileSystem::new(dir)?);
            ConfigManager::load_from(config_fs, &path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?
                .into_config()
        }
        None => ConfigManager::load_or_default(project_fs, Path::new(CONFIG_FILE_NAME))
            .await
            .context("Failed to load lockstep.toml")?
            .into_config(),
    };

    overrides.apply(&mut config);
    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
