// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::fmt;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub remote: RemoteStoreConfig,
    #[serde(default)]
    pub detect: DetectConfig,
    pub reports: ReportsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Where assets are read from and written to
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Files under `delivery.root_dir`
    Local,
    /// Objects in the configured remote bucket
    Remote,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Asset delivery configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DeliveryConfig {
    pub mode: DeliveryMode,
    /// Base directory the asset paths are resolved against in local mode
    pub root_dir: String,
}

/// Remote object store configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RemoteStoreConfig {
    /// Base URL of the object endpoint, e.g. `https://storage.example.com`
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    /// Bearer token sent with every object request
    #[serde(default)]
    pub token: Option<String>,
}

/// Image detection service configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DetectConfig {
    #[serde(default)]
    pub service_url: Option<String>,
}

/// Report document store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    pub data_dir: String,
}
