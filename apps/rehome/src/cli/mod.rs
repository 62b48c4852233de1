//! CLI command handling for rehome

mod report;

use crate::runner::{Mode, RunOptions, Runner};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rehome_config::{AppConfig, CONFIG_FILES};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// Exit code when `--check` finds files that would change
const EXIT_WOULD_CHANGE: u8 = 1;
/// Exit code for configuration and other fatal errors
const EXIT_FATAL: u8 = 2;

/// The main CLI struct.
#[derive(Parser)]
#[command(name = "rehome")]
#[command(about = "Rewrite import paths of relocated modules to their canonical folders")]
#[command(version)]
pub struct Cli {
    /// Project root; scan roots and the config file are resolved against it
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Read this config file instead of looking for rehome.toml in the root
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Repair broken quotes and normalize import paths
    Fix {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
        /// Like --dry-run, but exit with status 1 if any file would change (for CI)
        #[arg(long)]
        check: bool,
        /// Output format (pretty, json)
        #[arg(long, default_value = "pretty", value_parser = ["pretty", "json"])]
        format: String,
    },
    /// Only close unterminated or mismatched import quotes
    Repair {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
        /// Output format (pretty, json)
        #[arg(long, default_value = "pretty", value_parser = ["pretty", "json"])]
        format: String,
    },
    /// List relative imports that reach into another folder (read-only)
    Audit {
        /// Output format (pretty, json)
        #[arg(long, default_value = "pretty", value_parser = ["pretty", "json"])]
        format: String,
    },
    /// Write rehome.toml with the built-in registry preset
    Init {
        /// Overwrite an existing rehome.toml
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Config,
}

/// Main CLI entry point
pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let Cli {
        root,
        config: config_path,
        command,
    } = cli;

    match command {
        Commands::Init { force } => {
            handle_init(&root, force)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            let config = load_config(&root, config_path.as_deref())?;
            print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to render configuration")?
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fix {
            dry_run,
            check,
            format,
        } => {
            let options = RunOptions {
                mode: Mode::Fix,
                dry_run: dry_run || check,
            };
            handle_run(&root, config_path.as_deref(), options, &format, check).await
        }
        Commands::Repair { dry_run, format } => {
            let options = RunOptions {
                mode: Mode::Repair,
                dry_run,
            };
            handle_run(&root, config_path.as_deref(), options, &format, false).await
        }
        Commands::Audit { format } => {
            let options = RunOptions {
                mode: Mode::Audit,
                dry_run: true,
            };
            handle_run(&root, config_path.as_deref(), options, &format, false).await
        }
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let explicit = explicit.map(|path| {
        if path.is_relative() && !path.exists() {
            root.join(path)
        } else {
            path.to_path_buf()
        }
    });
    AppConfig::load_with(root, explicit.as_deref()).context("Failed to load configuration")
}

async fn handle_run(
    root: &Path,
    config_path: Option<&Path>,
    options: RunOptions,
    format: &str,
    check: bool,
) -> anyhow::Result<ExitCode> {
    let config = load_config(root, config_path)?;
    rehome_config::logging::initialize(&config);

    let runner = Runner::new(root, &config).context("Failed to build module registry")?;
    info!(root = %root.display(), mode = ?options.mode, "Starting run");

    let summary = runner.run(options).await;

    match format {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize report")?
        ),
        _ => print!("{}", report::render(&summary, options)),
    }

    if check && summary.changed_count() > 0 {
        return Ok(ExitCode::from(EXIT_WOULD_CHANGE));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_init(root: &Path, force: bool) -> anyhow::Result<()> {
    let path = root.join(CONFIG_FILES[0]);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::with_preset_table()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Wrote {}", path.display());
    Ok(())
}
