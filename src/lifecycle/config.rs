//! Client configuration (`<config dir>/gamehub/config.toml`).
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! `GAMEHUB_API_URL` and `GAMEHUB_ENV` override whatever the file says.

use crate::session::CredentialPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_URL_VAR: &str = "GAMEHUB_API_URL";
pub const ENVIRONMENT_VAR: &str = "GAMEHUB_ENV";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidValue {
                key: ENVIRONMENT_VAR,
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub environment: Environment,
    /// Lifetime of a persisted credential.
    pub credential_ttl_secs: u64,
    /// Overrides the credential file location under the platform data dir.
    pub credential_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            environment: Environment::Development,
            credential_ttl_secs: 3600,
            credential_file: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("No home directory to keep the credential in")]
    NoDataDir,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "gamehub", "gamehub")
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

impl ClientConfig {
    /// Loads `config.toml` from the platform config dir, then applies env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match config_dir().map(|dir| dir.join("config.toml")) {
            Some(path) if path.exists() => Self::from_path(&path)?,
            _ => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `GAMEHUB_*` overrides looked up through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(API_URL_VAR).filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(environment) = lookup(ENVIRONMENT_VAR) {
            self.environment = environment.parse()?;
        }
        Ok(self)
    }

    /// Credentials are marked secure in production only.
    pub fn credential_policy(&self) -> CredentialPolicy {
        let ttl_secs = i64::try_from(self.credential_ttl_secs).unwrap_or(i64::MAX);
        CredentialPolicy {
            ttl: chrono::Duration::try_seconds(ttl_secs).unwrap_or(chrono::Duration::MAX),
            secure: self.environment == Environment::Production,
        }
    }

    pub fn credential_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.credential_file {
            Some(path) => Ok(path.clone()),
            None => data_dir()
                .map(|dir| dir.join("credential.json"))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}
