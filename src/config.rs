use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::AppError;

/// Environment variable pointing at a config file that replaces the embedded one.
pub const CONFIG_ENV: &str = "POKEDEX_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../config/config.toml");

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub sources: SourcesConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub preference: PreferenceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SourcesConfig {
    pub custom: CustomSourceConfig,
    pub pokeapi: PokeApiConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CustomSourceConfig {
    pub data_dir: PathBuf,
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PokeApiConfig {
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BrowseConfig {
    pub page_size: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self { page_size: 12 }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct PreferenceConfig {
    #[serde(default)]
    pub path: String,
}

impl PreferenceConfig {
    // Falls back to the platform data dir, then the working directory.
    pub fn resolved_path(&self) -> PathBuf {
        if !self.path.is_empty() {
            return PathBuf::from(&self.path);
        }
        dirs_next::data_local_dir()
            .map(|dir| dir.join("pokedex"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("preferences.json")
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_index_file() -> String {
    "pockemons.json".to_string()
}

impl Config {
    pub fn from_toml(raw: &str) -> Result<Self, AppError> {
        toml::from_str(raw).map_err(|e| {
            tracing::error!("Failed to parse configuration: {}", e);
            AppError::from(e)
        })
    }

    /// Loads the file named by `POKEDEX_CONFIG`, or the embedded default.
    pub fn load() -> Result<Self, AppError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                tracing::debug!("Loading configuration from {}", path);
                let raw = std::fs::read_to_string(&path).map_err(|e| {
                    AppError::Config(format!("cannot read config file {}: {}", path, e))
                })?;
                Self::from_toml(&raw)
            }
            Err(_) => Self::from_toml(DEFAULT_CONFIG),
        }
    }
}
