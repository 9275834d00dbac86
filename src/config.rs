//! Configuration management for numintel.
//!
//! All configuration is loaded from `./config/numintel.toml`; the only
//! defaults in source code are the serde fallbacks mirroring the shipped
//! template. Credentials may additionally arrive via `NUMINTEL_*`
//! environment variables, which take precedence over the file.

use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/numintel.toml";

/// Default configuration file content
pub const DEFAULT_CONFIG: &str = include_str!("../config/numintel.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid URL in '{field}': {url}")]
    InvalidUrl { field: String, url: String },

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Bearer credentials for the lookup services. Each one is individually
/// optional; absence degrades only the owning capability.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub social_media: String,
    #[serde(default)]
    pub associated_numbers: String,
    #[serde(default)]
    pub network_tower: String,
    #[serde(default)]
    pub profile_photo: String,
    #[serde(default)]
    pub maps: String,
}

/// Resolve a credential: environment variable wins, then the config
/// value; empty means unset.
fn resolve_credential(env_var: &str, configured: &str) -> Option<String> {
    let value = match std::env::var(env_var) {
        Ok(v) => v,
        Err(_) => configured.to_string(),
    };
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl CredentialsConfig {
    pub fn social_media(&self) -> Option<String> {
        resolve_credential("NUMINTEL_SOCIAL_MEDIA_API_KEY", &self.social_media)
    }

    pub fn associated_numbers(&self) -> Option<String> {
        resolve_credential("NUMINTEL_ASSOCIATED_NUMBERS_API_KEY", &self.associated_numbers)
    }

    pub fn network_tower(&self) -> Option<String> {
        resolve_credential("NUMINTEL_NETWORK_TOWER_API_KEY", &self.network_tower)
    }

    pub fn profile_photo(&self) -> Option<String> {
        resolve_credential("NUMINTEL_PROFILE_PHOTO_API_KEY", &self.profile_photo)
    }

    pub fn maps(&self) -> Option<String> {
        resolve_credential("NUMINTEL_MAPS_API_KEY", &self.maps)
    }
}

/// Base URLs for the lookup and geocoding services
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_social_endpoint")]
    pub social_profiles: String,
    #[serde(default = "default_associated_endpoint")]
    pub associated_numbers: String,
    #[serde(default = "default_tower_endpoint")]
    pub network_tower: String,
    #[serde(default = "default_photo_endpoint")]
    pub profile_photo: String,
    #[serde(default = "default_geocode_endpoint")]
    pub geocode: String,
}

fn default_social_endpoint() -> String {
    "https://api.socialmedia.com/v1/profiles".to_string()
}

fn default_associated_endpoint() -> String {
    "https://api.associatednumbers.com/v1/lookup".to_string()
}

fn default_tower_endpoint() -> String {
    "https://api.networktower.com/v1/lookup".to_string()
}

fn default_photo_endpoint() -> String {
    "https://api.profilephoto.com/v1/photo".to_string()
}

fn default_geocode_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            social_profiles: default_social_endpoint(),
            associated_numbers: default_associated_endpoint(),
            network_tower: default_tower_endpoint(),
            profile_photo: default_photo_endpoint(),
            geocode: default_geocode_endpoint(),
        }
    }
}

/// Map artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Empty = Desktop, falling back to the current directory
    #[serde(default)]
    pub output_dir: String,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_zoom() -> u8 {
    9
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            output_dir: String::new(),
            zoom: default_zoom(),
        }
    }
}

impl MapConfig {
    pub fn resolved_output_dir(&self) -> PathBuf {
        if !self.output_dir.trim().is_empty() {
            return PathBuf::from(self.output_dir.trim());
        }
        dirs::desktop_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Live-location polling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_base_latitude")]
    pub base_latitude: f64,
    #[serde(default = "default_base_longitude")]
    pub base_longitude: f64,
    #[serde(default = "default_jitter_degrees")]
    pub jitter_degrees: f64,
}

fn default_interval_secs() -> u64 {
    10
}

fn default_base_latitude() -> f64 {
    17.385044
}

fn default_base_longitude() -> f64 {
    78.486671
}

fn default_jitter_degrees() -> f64 {
    0.05
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            base_latitude: default_base_latitude(),
            base_longitude: default_base_longitude(),
            jitter_degrees: default_jitter_degrees(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new(CONFIG_PATH))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.user_agent.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "http.user_agent".to_string(),
            });
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "http.request_timeout_secs".to_string(),
            });
        }

        for (field, url) in [
            ("endpoints.social_profiles", &self.endpoints.social_profiles),
            ("endpoints.associated_numbers", &self.endpoints.associated_numbers),
            ("endpoints.network_tower", &self.endpoints.network_tower),
            ("endpoints.profile_photo", &self.endpoints.profile_photo),
            ("endpoints.geocode", &self.endpoints.geocode),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl {
                    field: field.to_string(),
                    url: url.clone(),
                });
            }
        }

        if self.polling.interval_secs == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "polling.interval_secs".to_string(),
            });
        }
        if !self.polling.base_latitude.is_finite() || !self.polling.base_longitude.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "polling.base_latitude/base_longitude".to_string(),
                reason: "base coordinates must be finite".to_string(),
            });
        }
        if !self.polling.jitter_degrees.is_finite() || self.polling.jitter_degrees < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "polling.jitter_degrees".to_string(),
                reason: "jitter must be a nonnegative finite number".to_string(),
            });
        }

        Ok(())
    }

    /// Create default configuration file at the standard location
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = Path::new(CONFIG_PATH);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;

        Ok(path.to_path_buf())
    }

    /// Check if stdin is a TTY (interactive terminal)
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stdin)
    }

    /// Prompt user to create default config (only in interactive mode)
    pub fn prompt_create_config() -> Result<Option<PathBuf>, ConfigError> {
        if !Self::is_interactive() {
            return Ok(None);
        }

        print!("Configuration file not found. Create default config? [Y/n] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input.is_empty() || input == "y" || input == "yes" {
            let path = Self::create_default_config()?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }
}
