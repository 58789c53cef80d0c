use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use lockstep_config::{ConfigError, ConfigManager, CONFIG_FILE_NAME};
use lockstep_fs::NativeFileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default lockstep.toml at the project root
    Init,

    /// Show config file path
    Path,

    /// Validate config file
    Validate,
}

pub fn handle_config_command(cmd: ConfigCommand, project_dir: &Path) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async {
        let fs = Arc::new(
            NativeFileSystem::new(project_dir)
                .with_context(|| format!("Failed to open {}", project_dir.display()))?,
        );

        match cmd {
            ConfigCommand::Init => init_config(fs).await,
            ConfigCommand::Path => {
                println!("{}", config_path(&fs).display());
                Ok(())
            }
            ConfigCommand::Validate => validate_config(fs).await,
        }
    })
}

fn config_path(fs: &NativeFileSystem) -> PathBuf {
    use lockstep_fs::FileSystem;
    fs.project_root().join(CONFIG_FILE_NAME)
}

async fn init_config(fs: Arc<NativeFileSystem>) -> Result<()> {
    let path = config_path(&fs);

    match ConfigManager::init_at(fs, &path).await {
        Ok(_) => {
            println!("{} Initialized config at: {}", "✓".green(), path.display());
            Ok(())
        }
        Err(ConfigError::ConfigExists(_)) => {
            println!("Config already exists at: {}", path.display());
            println!("To reinitialize, please delete the existing config first.");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to write config"),
    }
}

async fn validate_config(fs: Arc<NativeFileSystem>) -> Result<()> {
    let path = config_path(&fs);
    let manager = ConfigManager::load_from(fs, &path)
        .await
        .context("Config not found or invalid. Run 'lockstep config init' first.")?;

    let config = manager.config();
    println!("{} Config is valid", "✓".green());
    println!("  Lockfile: {}", config.paths.lockfile.display());
    println!("  Manifest: {}", config.paths.manifest.display());
    println!("  Install dir: {}", config.paths.install_dir.display());
    println!("  Scan concurrency: {}", config.scan.max_concurrent);
    println!("  Break on major: {}", config.resolve.break_on_major);
    Ok(())
}
