//! API key resolution.
//!
//! The key comes from the `GEMINI_API_KEY` environment variable, or from
//! `~/.config/schedcal/config.toml` when the variable is unset.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize)]
struct Config {
    api_key: Option<String>,
}

/// Get the config file path (~/.config/schedcal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("schedcal");
    Ok(config_dir.join("config.toml"))
}

/// Resolve the Gemini API key from the environment or the config file.
pub fn load_api_key() -> Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }

    let path = config_path()?;

    if !path.exists() {
        anyhow::bail!(
            "No API key found.\n\n\
            Set the {} environment variable, or create {} with:\n\n\
            api_key = \"your-gemini-api-key\"",
            API_KEY_ENV,
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    config.api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
        anyhow::anyhow!(
            "Config file at {} has no api_key.\n\
            Add: api_key = \"your-gemini-api-key\"",
            path.display()
        )
    })
}
