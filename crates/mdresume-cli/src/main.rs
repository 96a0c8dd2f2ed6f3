//! mdresume CLI
//!
//! Command-line interface for mdresume - local markdown resume management.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mdresume_core::{ActivePointer, Config, DocumentRegistry, RegistryError, StorageError};

mod commands;
mod editor;
mod output;
mod sink;

use output::{Output, OutputFormat};
use sink::OutputSink;

#[derive(Parser)]
#[command(name = "mdresume")]
#[command(about = "mdresume - Local-first markdown resume management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all resumes (default)
    #[command(alias = "ls")]
    List,
    /// Create a resume from the default template
    #[command(alias = "create")]
    New {
        /// Name for the new resume
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Show resume details
    Show {
        /// Resume ID (full or prefix); defaults to the active resume
        id: Option<String>,
    },
    /// Rename a resume
    Rename {
        /// Resume ID (full or prefix)
        id: String,
        /// New name
        name: String,
    },
    /// Duplicate a resume
    #[command(alias = "cp")]
    Duplicate {
        /// Resume ID (full or prefix)
        id: String,
    },
    /// Delete a resume
    #[command(alias = "rm")]
    Delete {
        /// Resume ID (full or prefix)
        id: String,
    },
    /// Make a resume the active one
    Switch {
        /// Resume ID (full or prefix)
        id: String,
    },
    /// Edit a resume in $EDITOR
    Edit {
        /// Resume ID (full or prefix); defaults to the active resume
        id: Option<String>,
        /// Edit the stylesheet instead of the markdown
        #[arg(long)]
        css: bool,
    },
    /// Export all resumes to a JSON file
    Export {
        /// Destination file ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import resumes from an exported JSON file
    Import {
        /// File to import
        file: PathBuf,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show storage status
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        if let Some(hint) = storage_hint(&err) {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the registry
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    init_logging(&config);

    let registry = DocumentRegistry::open(&config).with_sink(OutputSink::new(output));
    let pointer = ActivePointer::new(config.session_path());

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => commands::resume::list(&registry, &pointer, &output).await,
        Commands::New { name } => {
            commands::resume::create(&registry, &pointer, name, &output).await
        }
        Commands::Show { id } => commands::resume::show(&registry, &pointer, id, &output).await,
        Commands::Rename { id, name } => {
            commands::resume::rename(&registry, id, name, &output).await
        }
        Commands::Duplicate { id } => commands::resume::duplicate(&registry, id, &output).await,
        Commands::Delete { id } => {
            commands::resume::delete(&registry, &pointer, id, &output).await
        }
        Commands::Switch { id } => {
            commands::resume::switch(&registry, &pointer, id, &output).await
        }
        Commands::Edit { id, css } => {
            commands::resume::edit(&registry, &pointer, id, css, &output).await
        }
        Commands::Export { output: destination } => {
            commands::transfer::export(&registry, destination, &output).await
        }
        Commands::Import { file } => commands::transfer::import(&registry, file, &output).await,
        Commands::Status => commands::status::show(&registry, &pointer, &config, &output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Recovery suggestion for a failure caused by the data store
fn storage_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(RegistryError::Storage(storage)) = cause.downcast_ref::<RegistryError>() {
            return storage.recovery_suggestion();
        }
        cause
            .downcast_ref::<StorageError>()
            .and_then(StorageError::recovery_suggestion)
    })
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize logging
///
/// Only initializes if MDRESUME_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("MDRESUME_LOG") else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "mdresume_core={},mdresume={}",
        log_level, log_level
    ));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("logging initialized to {:?}", log_path);
}
