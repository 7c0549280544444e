//! Persistent console settings stored as TOML in the app directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the console configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides the endpoint for a single run.
pub const ENDPOINT_ENV: &str = "PREDICT_CONSOLE_ENDPOINT";
/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Settings persisted between launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the prediction service (`/model-info` and `/predict` live under it).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Errors that may occur while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No suitable config directory found: {0}")]
    NoConfigDir(#[from] app_dirs::AppDirError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Resolve the configuration file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the config, writing defaults on first launch, then apply the env override.
pub fn load_or_default() -> Result<ConsoleConfig, ConfigError> {
    let path = config_path()?;
    let mut config = if path.exists() {
        load_from(&path)?
    } else {
        let defaults = ConsoleConfig::default();
        save_to(&path, &defaults)?;
        defaults
    };
    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
        if !endpoint.trim().is_empty() {
            tracing::info!("Endpoint overridden by {ENDPOINT_ENV}: {endpoint}");
            config.endpoint = endpoint;
        }
    }
    validate_endpoint(&config.endpoint)?;
    Ok(config)
}

pub(crate) fn load_from(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn save_to(path: &Path, config: &ConsoleConfig) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Check that the endpoint is an absolute http(s) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let parsed = url::Url::parse(endpoint.trim()).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::test_support::OverrideGuard;
    use tempfile::tempdir;

    #[test]
    fn missing_file_writes_defaults() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let config = load_or_default().unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert!(config_path().unwrap().is_file());
    }

    #[test]
    fn missing_endpoint_field_uses_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "").unwrap();
        assert_eq!(load_from(&path).unwrap().endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn saved_endpoint_is_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = ConsoleConfig {
            endpoint: "https://models.example.org/api".into(),
        };
        save_to(&path, &config).unwrap();
        assert_eq!(load_from(&path).unwrap(), config);
    }

    #[test]
    fn malformed_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "endpoint = [").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn endpoint_validation_rejects_non_http() {
        assert!(validate_endpoint("http://localhost:5000").is_ok());
        assert!(validate_endpoint("https://example.org/").is_ok());
        assert!(validate_endpoint("ftp://example.org").is_err());
        assert!(validate_endpoint("not a url").is_err());
    }
}
