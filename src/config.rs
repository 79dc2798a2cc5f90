//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::auth::FileSessionStore;
use crate::client::ClientConfig;
use crate::geo::{LatLng, MapSettings, DEFAULT_CENTER, OSM_TILE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Council API connection
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Where the signed-in session is kept
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Session file; defaults to the platform data directory
    pub file: Option<String>,
}

/// Map tiles and the view shown when nothing is located
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MapConfig {
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    #[serde(default = "default_center_lat")]
    pub default_lat: f64,

    #[serde(default = "default_center_lon")]
    pub default_lon: f64,

    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
}

fn default_tile_url() -> String {
    OSM_TILE_URL.to_string()
}

fn default_center_lat() -> f64 {
    DEFAULT_CENTER.lat
}

fn default_center_lon() -> f64 {
    DEFAULT_CENTER.lon
}

fn default_zoom() -> u8 {
    12
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: default_tile_url(),
            default_lat: default_center_lat(),
            default_lon: default_center_lon(),
            default_zoom: default_zoom(),
        }
    }
}

impl MapConfig {
    pub fn default_center(&self) -> LatLng {
        LatLng::new(self.default_lat, self.default_lon)
    }

    /// Card map settings with this default view
    pub fn card_settings(&self) -> MapSettings {
        MapSettings::mini().with_center(self.default_center(), self.default_zoom)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("localgov").join("config.toml")),
            Some(PathBuf::from("/etc/localgov/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("LOCALGOV_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("LOCALGOV_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring LOCALGOV_TIMEOUT_SECS={:?}", timeout),
            }
        }

        // Session overrides
        if let Some(file) = var("LOCALGOV_SESSION_FILE") {
            self.session.file = Some(file);
        }

        // Logging overrides
        if let Some(level) = var("LOCALGOV_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("LOCALGOV_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            request_timeout_secs: self.api.request_timeout_secs,
        }
    }

    /// Session file from config, else the platform default
    pub fn session_path(&self) -> PathBuf {
        self.session
            .file
            .as_ref()
            .map(PathBuf::from)
            .or_else(FileSessionStore::default_path)
            .unwrap_or_else(|| PathBuf::from("./localgov-session.json"))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# LocalGov Resident Portal Configuration
#
# Environment variables override these settings:
# - LOCALGOV_API_URL
# - LOCALGOV_TIMEOUT_SECS
# - LOCALGOV_SESSION_FILE
# - LOCALGOV_LOG_LEVEL
# - LOCALGOV_LOG_FORMAT

[api]
# Council API base URL
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Where the login token is kept (defaults to the platform data directory)
# file = "~/.local/share/localgov/session.json"

[map]
# Tile server URL template ({s} rotates through a, b and c)
tile_url = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"

# Card map view used when a record has no location (Sydney CBD)
default_lat = -33.8688
default_lon = 151.2093
default_zoom = 12

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for scripting)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://council.example.org\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://council.example.org");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.map.default_zoom, 12);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[api\nbase_url=").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("LOCALGOV_API_URL", "https://override.example.org"),
            ("LOCALGOV_TIMEOUT_SECS", "5"),
            ("LOCALGOV_SESSION_FILE", "/tmp/session.json"),
            ("LOCALGOV_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://override.example.org");
        assert_eq!(config.client_config().request_timeout_secs, 5);
        assert_eq!(config.session_path(), PathBuf::from("/tmp/session.json"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_card_settings_use_default_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[map]\ndefault_lat = -42.88\ndefault_lon = 147.33\ndefault_zoom = 9\n")
            .unwrap();

        let settings = Config::load(&path).unwrap().map.card_settings();
        assert_eq!(settings.default_center, LatLng::new(-42.88, 147.33));
        assert_eq!(settings.default_zoom, 9);
        assert_eq!(settings.width, MapSettings::mini().width);
        assert_eq!(Config::default().map.card_settings(), MapSettings::mini());
    }

    #[test]
    fn test_bad_timeout_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "LOCALGOV_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert_eq!(config.api.request_timeout_secs, 30);
    }
}
