//! Common utilities and configuration for tools

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct GlobalConfig {
    /// Experiment configuration file (TOML or JSON)
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            config: None,
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

/// Resolve the tracing level from the global options
pub fn log_level(config: &GlobalConfig) -> Result<tracing::Level> {
    if config.debug {
        return Ok(tracing::Level::DEBUG);
    }

    config
        .log_level
        .parse::<tracing::Level>()
        .with_context(|| format!("Invalid log level: {}", config.log_level))
}

/// Initialize logging based on configuration
pub fn init_logging(config: &GlobalConfig) -> Result<()> {
    let level = log_level(config)?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    Ok(())
}

/// Load configuration from file
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    // Try JSON first, then TOML
    if let Ok(config) = serde_json::from_str(&content) {
        return Ok(config);
    }

    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("Failed to parse config file {:?}: {}", path, e),
    }
}

/// Save configuration to file
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}
