use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // MongoDB configuration
    /// MongoDB connection string
    #[serde(default = "default_mongodb_url")]
    pub mongodb_url: String,

    /// Database holding the telemetry collections
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Timeout for connection establishment in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    // HTTP configuration
    /// HTTP listen host
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// HTTP listen port
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

fn default_log_level() -> String {
    "info".to_string()
}

// MongoDB defaults
fn default_mongodb_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "underwater_navigation".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

// HTTP defaults
fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("NAUTILUS"))
            .build()?
            .try_deserialize()
    }
}
