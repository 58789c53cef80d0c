//! Lockstep CLI - pins duplicated native JavaScript packages to one version.

use anyhow::Result;
use clap::Parser;
use lockstep_cli::cli::analysis::{self, AnalysisRunOptions, ConfigOverrides};
use lockstep_cli::commands::{self, ConfigCommand};
use lockstep_cli::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lockstep", version)]
#[command(about = "Find native JavaScript packages installed at several versions and pin each to one", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Project root holding the lockfile and manifest
    #[arg(value_name = "PROJECT_DIR", default_value = ".")]
    project_dir: PathBuf,

    /// Write the chosen versions into the manifest's `resolutions`
    ///
    /// Without this flag the run only reports what it would change.
    #[arg(long)]
    write: bool,

    /// Output format
    #[arg(short, long = "output", value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Configuration file path (default: <PROJECT_DIR>/lockstep.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lockfile, relative to the project root
    #[arg(long)]
    lockfile: Option<PathBuf>,

    /// Manifest, relative to the project root
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Root install directory, relative to the project root
    #[arg(long)]
    install_dir: Option<PathBuf>,

    /// Number of packages scanned at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Pick the newer of two versions of a package
    Resolve {
        /// Package name
        package: String,

        /// First version
        version1: String,

        /// Second version
        version2: String,

        /// Compare across major versions instead of reporting a conflict
        #[arg(long)]
        allow_major: bool,
    },

    /// Manage lockstep configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Resolve {
            package,
            version1,
            version2,
            allow_major,
        }) => commands::handle_resolve_command(
            &package,
            &version1,
            &version2,
            !allow_major,
            cli.format,
        ),
        Some(Command::Config { command }) => {
            commands::handle_config_command(command, &cli.project_dir)
        }
        None => analysis::run_analysis(&AnalysisRunOptions {
            project_dir: cli.project_dir,
            write: cli.write,
            config: cli.config,
            overrides: ConfigOverrides {
                lockfile: cli.lockfile,
                manifest: cli.manifest,
                install_dir: cli.install_dir,
                concurrency: cli.concurrency,
            },
            format: cli.format,
        }),
    }
}
