use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use formfill_cli::Config;
use tokio::fs;
use tracing::info;

use super::runtime::LoadedConfig;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Validate the configuration file
    Validate,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub async fn cmd_config(args: ConfigArgs, loaded: &LoadedConfig) -> Result<()> {
    let path = loaded.path.as_path();
    match args.action {
        ConfigAction::Show => {
            if loaded.found {
                println!("Current configuration ({}):", path.display());
            } else {
                println!("Default configuration (no file at {}):", path.display());
            }
            print!("{}", loaded.config.to_yaml()?);
        }
        ConfigAction::Validate => {
            if loaded.found {
                loaded
                    .config
                    .validate()
                    .with_context(|| format!("validating {}", path.display()))?;
                println!("Configuration file {} is valid", path.display());
            } else {
                println!(
                    "No configuration file at {}; defaults are valid",
                    path.display()
                );
            }
        }
        ConfigAction::Init { force } => {
            if fs::try_exists(path).await? && !force {
                bail!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                );
            }
            save_config_file(path, &Config::default()).await?;
            info!(path = %path.display(), "wrote default configuration");
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

async fn save_config_file(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, config.to_yaml()?)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
