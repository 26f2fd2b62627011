use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_AUTH_TOKEN, DEFAULT_SESSION_PATH, DEFAULT_WINDOW_DAYS};
use crate::error::{ClientError, Result};

pub const CONFIG_PATH: &str = "config.toml";
pub const BASE_URL_ENV: &str = "FOODTEIN_API_BASE_URL";
pub const AUTH_TOKEN_ENV: &str = "FOODTEIN_AUTH_TOKEN";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_auth_token")]
    pub auth_token: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_message_timeout")]
    pub message_timeout_secs: u64,
    #[serde(default = "default_health_check_timeout")]
    pub health_check_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
    #[serde(default = "default_window_days")]
    pub window_days: usize,
}

fn default_base_url() -> String { DEFAULT_API_BASE_URL.to_string() }
fn default_auth_token() -> String { DEFAULT_AUTH_TOKEN.to_string() }
fn default_request_timeout() -> u64 { 10 }
fn default_message_timeout() -> u64 { 60 }
fn default_health_check_timeout() -> u64 { 5 }
fn default_session_path() -> PathBuf { PathBuf::from(DEFAULT_SESSION_PATH) }
fn default_window_days() -> usize { DEFAULT_WINDOW_DAYS }

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: default_auth_token(),
            request_timeout_secs: default_request_timeout(),
            message_timeout_secs: default_message_timeout(),
            health_check_timeout_secs: default_health_check_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            window_days: default_window_days(),
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }

    pub fn health_check_timeout(&self) -> Duration {
        Duration::from_secs(self.health_check_timeout_secs)
    }
}

impl Config {
    /// Load `config.toml` from the working directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Load from `path`, falling back to defaults when the file does not
    /// exist, then apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                ClientError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
            })?;
            Self::from_toml(&content)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            self.backend.base_url = url;
        }
        if let Ok(token) = std::env::var(AUTH_TOKEN_ENV) {
            self.backend.auth_token = token;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ClientError::Config("backend.base_url must not be empty".into()));
        }
        if self.session.window_days == 0 {
            return Err(ClientError::Config("session.window_days must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8080/api");
        assert_eq!(config.backend.auth_token, "bearer streamlit");
        assert_eq!(config.backend.message_timeout(), Duration::from_secs(60));
        assert_eq!(config.session.window_days, 7);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [backend]
            base_url = "https://api.example.com/api"
            request_timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.com/api");
        assert_eq!(config.backend.request_timeout_secs, 3);
        assert_eq!(config.backend.health_check_timeout_secs, 5);
        assert_eq!(config.session.path, PathBuf::from(".foodtein/session.json"));
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let mut config = Config::default();
        config.session.window_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(matches!(Config::from_toml("[backend"), Err(ClientError::Toml(_))));
    }
}
