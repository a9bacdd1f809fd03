//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the API base URL, how long notifications stay on screen, an optional
//! request timeout, and the last event id the user looked up.
//!
//! Configuration is stored at `~/.config/eventdesk/config.json`. The base
//! URL can be overridden with `EVENTDESK_API_BASE_URL`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::controller::DEFAULT_NOTIFICATION_DURATION;

/// Application name used for config/log directory paths
const APP_NAME: &str = "eventdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured base URL
pub const API_BASE_URL_ENV: &str = "EVENTDESK_API_BASE_URL";

/// Used when neither the environment nor the config file name a base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub notification_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub last_event_id: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files.
    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join("logs"))
    }

    /// Base URL with the environment override applied.
    pub fn api_base_url(&self) -> String {
        self.resolve_base_url(std::env::var(API_BASE_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn notification_duration(&self) -> Duration {
        self.notification_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_NOTIFICATION_DURATION)
    }

    /// `None` means requests are not bounded by the client.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_precedence() {
        let config = Config {
            api_base_url: Some("http://file.example/api".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_base_url(Some("http://env.example/api".to_string())),
            "http://env.example/api"
        );
        assert_eq!(config.resolve_base_url(None), "http://file.example/api");
        assert_eq!(config.resolve_base_url(Some(" ".to_string())), "http://file.example/api");
        assert_eq!(Config::default().resolve_base_url(None), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.notification_duration(), Duration::from_secs(6));
        assert_eq!(config.request_timeout(), None);

        let config = Config {
            notification_secs: Some(3),
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.notification_duration(), Duration::from_secs(3));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_config_roundtrip_ignores_missing_fields() {
        let config: Config = serde_json::from_str(r#"{"api_base_url":"http://x/api"}"#)
            .expect("parse config");
        assert_eq!(config.api_base_url.as_deref(), Some("http://x/api"));
        assert_eq!(config.last_event_id, None);
    }
}
