//! Optional user configuration (`config.toml`).
//!
//! Looked up at `$XDG_CONFIG_HOME/rendafixa/config.toml` unless a path is given.
//! A missing file means built-in defaults; a malformed file is an error.

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cdi::DEFAULT_CDI_URL;

const CONFIG_FILENAME: &str = "config.toml";
const DEFAULT_STEP_DAYS: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cdi: CdiConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CdiConfig {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Sampling step for the net-value chart
    pub step_days: u32,
    /// Annual custody fee (%) used when none is given on the command line
    pub custody_fee_pct: Option<Decimal>,
}

impl Default for CdiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CDI_URL.to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            step_days: DEFAULT_STEP_DAYS,
            custody_fee_pct: None,
        }
    }
}

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("rendafixa"))
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid configuration file")?;
        if config.defaults.step_days == 0 {
            return Err(anyhow!("defaults.step_days must be at least 1"));
        }
        Ok(config)
    }

    /// Load from an explicit path (must exist) or the default location (optional).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (get_config_dir()?.join(CONFIG_FILENAME), false),
        };

        if !path.exists() {
            if required {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        info!("Loading config from {}", path.display());
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
    }
}
