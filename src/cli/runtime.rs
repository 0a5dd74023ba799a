use std::path::PathBuf;

use anyhow::{Context, Result};
use formfill_cli::{resolve_config_path, Config, LogFormat};
use tokio::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(level: &str, debug: bool, format: LogFormat) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    /// File the configuration came from, or where it would be written.
    pub path: PathBuf,
    pub found: bool,
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let path = resolve_config_path(config_path.map(PathBuf::as_path))
        .unwrap_or_else(|| PathBuf::from(formfill_cli::config::LOCAL_CONFIG_PATH));

    if fs::try_exists(&path).await.unwrap_or(false) {
        let raw = fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Config::from_yaml_str(&raw)
            .with_context(|| format!("loading {}", path.display()))?;
        Ok(LoadedConfig {
            config,
            path,
            found: true,
        })
    } else {
        Ok(LoadedConfig {
            config: Config::default(),
            path,
            found: false,
        })
    }
}
