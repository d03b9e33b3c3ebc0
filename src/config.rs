use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{Coordinates, RIO_DE_JANEIRO_CENTER};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub users: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySettings {
    /// Maximum provider documents fetched per refresh
    #[serde(default = "default_provider_limit")]
    pub provider_limit: usize,
    /// Seconds between provider snapshots; 0 disables the background feed
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
    /// Use the fallback point when a request has no caller location
    #[serde(default = "default_true")]
    pub fallback_caller_location: bool,
    #[serde(default = "default_alert_cooldown")]
    pub alert_cooldown_secs: u64,
}

impl DiscoverySettings {
    pub fn fallback_location(&self) -> Coordinates {
        Coordinates::new(self.fallback_latitude, self.fallback_longitude)
    }
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            provider_limit: default_provider_limit(),
            refresh_interval_secs: default_refresh_interval(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
            fallback_caller_location: default_true(),
            alert_cooldown_secs: default_alert_cooldown(),
        }
    }
}

fn default_provider_limit() -> usize { 50 }
fn default_refresh_interval() -> u64 { 30 }
fn default_fallback_latitude() -> f64 { RIO_DE_JANEIRO_CENTER.latitude }
fn default_fallback_longitude() -> f64 { RIO_DE_JANEIRO_CENTER.longitude }
fn default_true() -> bool { true }
fn default_alert_cooldown() -> u64 { 30 * 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DISCOVERY__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DISCOVERY__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("DISCOVERY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
