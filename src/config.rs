use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api.api_key`
pub const API_KEY_ENV: &str = "APOD_API_KEY";

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

/// APOD API access
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint queried with `?api_key=...&date=YYYY-MM-DD`
    pub base_url: String,
    /// api.nasa.gov key; `DEMO_KEY` works with a low rate limit
    pub api_key: String,
    /// Per-request timeout (in seconds)
    pub timeout_secs: u64,
}

/// UI configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// "dark" or "light"
    pub theme: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "https://api.nasa.gov/planetary/apod".to_string(),
            api_key: "DEMO_KEY".to_string(),
            timeout_secs: 20,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: "dark".to_string(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    /// - Linux: ~/.config/apod-viewer/config.toml
    /// - macOS: ~/Library/Application Support/apod-viewer/config.toml
    /// - Windows: %APPDATA%\apod-viewer\config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("apod-viewer").join("config.toml"))
    }

    /// Load configuration from file, or return defaults if it is missing or
    /// broken. The API key environment variable is applied on top.
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .filter(|path| path.exists())
            .map(|path| Self::read(&path))
            .unwrap_or_default();

        config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        config
    }

    fn read(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "Failed to parse config file: {}", e);
                Config::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read config file: {}", e);
                Config::default()
            }
        }
    }

    /// Parse TOML contents; missing keys fall back to defaults
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Replace the API key when `value` is set and non-empty
    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api.api_key = key;
        }
    }

    /// Whether the configured theme is light (anything else is dark)
    pub fn prefers_light_theme(&self) -> bool {
        self.ui.theme.trim().eq_ignore_ascii_case("light")
    }
}
