//! Client configuration.
//!
//! Configuration lives in an optional `config.toml` inside the data
//! directory (default `~/.bionexus`). Every field has a compiled-in
//! default, so the client runs without any configuration file.

use crate::error::{BionexusError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default endpoint of the Renaiscent analysis service.
pub const DEFAULT_ENDPOINT: &str = "https://renaiscent-bionexus.onrender.com/api/query";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL of the analysis query endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Timeout applied to each query request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `config.toml` under the given base
    /// directory, falling back to defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or
    /// parsed.
    pub fn load_from(base_dir: impl AsRef<Path>) -> Result<Self> {
        let path = base_dir.as_ref().join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Returns the default data directory (`~/.bionexus`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_data_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BionexusError::config("Cannot find home directory"))?;
        Ok(home.join(".bionexus"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_absent() {
        let temp_dir = TempDir::new().unwrap();
        let config = ClientConfig::load_from(temp_dir.path()).unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "endpoint = \"http://localhost:8080/api/query\"\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(temp_dir.path()).unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080/api/query");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "endpoint = [not toml").unwrap();

        let result = ClientConfig::load_from(temp_dir.path());
        assert!(matches!(
            result,
            Err(BionexusError::Serialization { .. })
        ));
    }
}
