//! Application configuration.
//!
//! Loads settings from config.json at startup: next to the executable first,
//! then the per-user config directory. Missing fields use defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::ocr::OcrConfig;
use crate::scoring::ScoringConfig;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Complete application configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub ocr: OcrConfig,
}

impl AppConfig {
    /// Reads and validates a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Writes the default config as pretty JSON (for reference).
    pub fn save_default(path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Loads configuration from the first config.json found, or returns defaults.
fn load_config() -> AppConfig {
    for config_path in crate::paths::config_candidates() {
        if !config_path.exists() {
            continue;
        }
        crate::log(&format!("Loading config from: {}", config_path.display()));
        match AppConfig::load_from(&config_path) {
            Ok(config) => return config,
            Err(e) => {
                crate::log(&format!("{:#}. Using defaults.", e));
                return AppConfig::default();
            }
        }
    }

    crate::log("config.json not found. Using default config.");
    AppConfig::default()
}

/// Initializes the global configuration. Call once at startup.
///
/// An explicit path must load; the default lookup falls back to defaults.
pub fn init_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => load_config(),
    };
    let _ = CONFIG.set(config);
    Ok(())
}

/// Returns a reference to the global configuration, loading it on first use.
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(load_config)
}
