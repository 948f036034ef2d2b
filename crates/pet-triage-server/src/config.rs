//! Configuration loading with multi-source merging.
//!
//! Server and pipeline settings share one flat namespace, so a single TOML
//! file or a set of `PET_TRIAGE_*` variables can set either.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use pet_triage_llm::TriageConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Project-level config file picked up from the working directory.
pub const PROJECT_CONFIG_FILE: &str = "pet-triage.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PET_TRIAGE_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".into(),
            log_filter: "info,tower_http=info".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub triage: TriageConfig,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `PET_TRIAGE_*` environment variables
    /// 2. Explicit config path, or `./pet-triage.toml` when none is given
    /// 3. Default values
    pub fn load(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(ServerConfig::default()))
            .merge(Serialized::defaults(TriageConfig::default()));

        match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let project = PathBuf::from(PROJECT_CONFIG_FILE);
                if project.exists() {
                    figment = figment.merge(Toml::file(project));
                }
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        Ok(AppConfig {
            server: figment.extract().map_err(Box::new)?,
            triage: figment.extract().map_err(Box::new)?,
        })
    }

    pub fn load_defaults() -> AppConfig {
        AppConfig::default()
    }
}
