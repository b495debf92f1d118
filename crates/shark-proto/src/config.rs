use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;
use crate::error::ProtoError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub daemon: ControlApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where rsharkd's control API lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlApiConfig {
    /// Origin serving `/config/get` and `/config/apply`. The stream status
    /// endpoint is derived from its scheme and host.
    #[serde(default = "default_daemon_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Housekeeping tick for the event loop, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for ControlApiConfig {
    fn default() -> Self {
        Self {
            url: default_daemon_url(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_daemon_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_tick_ms() -> u64 {
    250
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self, ProtoError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ProtoError> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ProtoError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        platform::temp_dir()
            .join(format!("sharkpanel-test-{}-{}", name, std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.daemon.url, "http://127.0.0.1:8080");
        assert_eq!(config.ui.tick_ms, 250);
        assert!(Config::config_path().ends_with("sharkpanel/config.toml"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[daemon]\nurl = \"http://shark:9000\"\n").unwrap();
        assert_eq!(config.daemon.url, "http://shark:9000");
        assert_eq!(config.ui.tick_ms, 250);
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let path = scratch("first-load");
        let _ = std::fs::remove_file(&path);

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.daemon.url, "http://127.0.0.1:8080");
        assert!(path.exists());

        let reread = Config::load_from(&path).unwrap();
        assert_eq!(reread.ui.tick_ms, config.ui.tick_ms);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let path = scratch("broken");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[daemon\nurl=").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ProtoError::ConfigParse(_)));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
