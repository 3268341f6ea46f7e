use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use directories::ProjectDirs;
use fitlog_domain::{UserID, WeightUnit};
use fitlog_storage::{CompletionConfig, StoreConfig};
use log::LevelFilter;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub completion: CompletionConfig,
    pub user_id: Option<String>,
    pub weight_unit: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            completion: CompletionConfig::default(),
            user_id: None,
            weight_unit: WeightUnit::default().to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing configuration value {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Location of the configuration file in the platform's config directory.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fitlog").map(|dirs| dirs.config_dir().join("config.json"))
}

impl Config {
    /// Reads the configuration file and applies overrides from the environment.
    ///
    /// A missing file at the default location is not an error, a missing file that was
    /// explicitly requested is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(value) = var("FITLOG_STORE_PROJECT_ID") {
            self.store.project_id = value;
        }
        if let Some(value) = var("FITLOG_STORE_DATASET") {
            self.store.dataset = value;
        }
        if let Some(value) = var("FITLOG_STORE_API_VERSION") {
            self.store.api_version = value;
        }
        if let Some(value) = var("FITLOG_STORE_TOKEN") {
            self.store.token = Some(value);
        }
        if let Some(value) = var("FITLOG_COMPLETION_ENDPOINT") {
            self.completion.endpoint = value;
        }
        if let Some(value) = var("FITLOG_COMPLETION_MODEL") {
            self.completion.model = value;
        }
        if let Some(value) = var("FITLOG_COMPLETION_API_KEY") {
            self.completion.api_key = Some(value);
        }
        if let Some(value) = var("FITLOG_USER_ID") {
            self.user_id = Some(value);
        }
        if let Some(value) = var("FITLOG_WEIGHT_UNIT") {
            self.weight_unit = value;
        }
        if let Some(value) = var("FITLOG_LOG") {
            self.log_level = value;
        }
    }

    pub fn store(&self) -> Result<&StoreConfig, ConfigError> {
        if self.store.project_id.trim().is_empty() {
            return Err(ConfigError::Missing("store.project_id"));
        }
        Ok(&self.store)
    }

    pub fn user_id(&self) -> Result<UserID, ConfigError> {
        let Some(ref user_id) = self.user_id else {
            return Err(ConfigError::Missing("user_id"));
        };
        UserID::new(user_id).map_err(|_| ConfigError::Invalid {
            key: "user_id",
            value: user_id.clone(),
        })
    }

    pub fn weight_unit(&self) -> Result<WeightUnit, ConfigError> {
        WeightUnit::from_str(self.weight_unit.trim()).map_err(|_| ConfigError::Invalid {
            key: "weight_unit",
            value: self.weight_unit.clone(),
        })
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim()).map_err(|_| ConfigError::Invalid {
            key: "log_level",
            value: self.log_level.clone(),
        })
    }
}
