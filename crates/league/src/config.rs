//! League configuration

use league_core::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `league.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// Title printed above reports
    pub name: String,
    /// Where participants, seasons and fixtures are kept
    pub data_file: PathBuf,
    /// Default tracing filter when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            name: "Internal League".to_string(),
            data_file: PathBuf::from("league.json"),
            log_filter: "info".to_string(),
        }
    }
}

impl LeagueConfig {
    /// Load config from a TOML file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LeagueError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| LeagueError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LeagueError::Config(e.to_string()))
    }
}
