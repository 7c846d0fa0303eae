use crate::search::FilterState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://api.tvmaze.com";
pub const DEFAULT_QUERY: &str = "harry";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine home directory")]
    NoHomeDirectory,
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::Io { path, source } => {
                format!("Could not read config file {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                format!("Config file {} is not valid JSON: {}", path.display(), source)
            }
            ConfigError::Invalid(msg) => format!("Configuration error: {}", msg),
            ConfigError::NoHomeDirectory => "Could not determine home directory".to_string(),
        }
    }
}

/// Runtime settings. Every field has a default, so a config file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub api_base_url: String,
    pub initial_query: String,
    pub presets: Vec<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            initial_query: DEFAULT_QUERY.to_string(),
            presets: ["harry", "batman", "superman", "friends", "star"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            request_timeout_secs: 10,
            user_agent: format!("show-explorer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Where a configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl ExplorerConfig {
    /// Load from `explicit` if given (it must exist), otherwise from the
    /// per-user config directory if a file is there, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())));
        }

        let path = default_config_path()?;
        if path.exists() {
            let config = Self::from_file(&path)?;
            Ok((config, ConfigSource::File(path)))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        FilterState::new(&self.initial_query)
            .map_err(|_| ConfigError::Invalid("initial_query must not be blank".to_string()))?;
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be blank".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn project_dirs() -> Result<directories::ProjectDirs, ConfigError> {
    directories::ProjectDirs::from("com", "tvmaze", "show-explorer")
        .ok_or(ConfigError::NoHomeDirectory)
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

pub fn default_log_dir() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().join("logs"))
}
