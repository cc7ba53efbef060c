//! Application configuration.
//!
//! Settings come from built-in defaults, then an optional `stockbook.toml`
//! (or any other format the `config` crate recognises under that base name)
//! in the working directory, then `STOCKBOOK__*` environment variables,
//! e.g. `STOCKBOOK__DATABASE_URL=sqlite:/var/lib/stockbook.db`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::models::attendance::AttendanceMode;

const CONFIG_FILE: &str = "stockbook";
const ENV_PREFIX: &str = "STOCKBOOK";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to
    pub bind_address: String,
    /// SQLite URL of the data file
    pub database_url: String,
    pub max_connections: u32,
    /// How long a writer waits for the SQLite write lock before failing
    pub busy_timeout_seconds: u64,
    pub attendance_mode: AttendanceMode,
    /// Directory with the built web UI, served for every non-API path
    pub static_dir: Option<String>,
    /// Origin allowed to call the API from a browser
    pub cors_origin: String,
    pub max_signature_bytes: usize,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            database_url: "sqlite:inventory_management.db".to_string(),
            max_connections: 5,
            busy_timeout_seconds: 5,
            attendance_mode: AttendanceMode::Compat,
            static_dir: None,
            cors_origin: "http://localhost:8080".to_string(),
            max_signature_bytes: 5 * 1024 * 1024,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `stockbook.toml` (optional) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(
                    Environment::with_prefix(ENV_PREFIX)
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings = builder.build()?;
        settings.try_deserialize::<AppConfig>().map_err(|e| {
            ConfigError::Message(format!("Configuration could not be loaded: {}", e))
        })
    }
}
