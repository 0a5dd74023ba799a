mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use crate::cli::{
    cmd_config, cmd_detect, cmd_fill, cmd_info, cmd_profiles, init_logging, load_config,
    ConfigArgs, DetectArgs, FillArgs, OutputFormat, ProfilesArgs,
};

#[derive(Parser)]
#[command(name = "formfill")]
#[command(version, about = "Detect form fields in HTML pages and fill them from a profile")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,

    /// Output format
    #[arg(short, long, default_value = "human")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and fill the fields of an HTML page
    Fill(FillArgs),

    /// Show how each control of an HTML page is classified
    Detect(DetectArgs),

    /// List the profiles of a profile book
    Profiles(ProfilesArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Show build and configuration information
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_ref()).await?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| loaded.config.log_level.clone());
    init_logging(&level, cli.debug, loaded.config.log_format)?;

    if loaded.found {
        info!("Loaded configuration from: {}", loaded.path.display());
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            loaded.path.display()
        );
    }

    let config = &loaded.config;
    let result = match cli.command {
        Commands::Fill(args) => cmd_fill(args, config, cli.format).await,
        Commands::Detect(args) => cmd_detect(args, config, cli.format).await,
        Commands::Profiles(args) => cmd_profiles(args, config, cli.format).await,
        Commands::Config(args) => cmd_config(args, &loaded).await,
        Commands::Info => cmd_info(&loaded).await,
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Command failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
