//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the entrypoint.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the container entrypoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct EntrypointConfig {
    /// Conditional database readiness gate.
    pub database: DatabaseConfig,

    /// Unconditional cache readiness gate.
    pub cache: CacheConfig,

    /// Poll loop tuning shared by both gates.
    pub readiness: ReadinessConfig,

    /// Code root and management command.
    pub bootstrap: BootstrapConfig,

    /// Fuel-station data import step.
    pub import: ImportConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Database gate configuration.
///
/// The gate is enabled only when `selector_var` holds exactly `expected`.
/// Host and port are then read from `host_var` and `port_var`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Name of the database-identity selector variable.
    pub selector_var: String,

    /// Literal the selector must equal to enable the gate.
    pub expected: String,

    /// Variable holding the database host.
    pub host_var: String,

    /// Variable holding the database port.
    pub port_var: String,

    /// Display name used in progress lines.
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            selector_var: "DATABASE".to_string(),
            expected: "postgres".to_string(),
            host_var: "SQL_HOST".to_string(),
            port_var: "SQL_PORT".to_string(),
            name: "PostgreSQL".to_string(),
        }
    }
}

/// Cache gate configuration. Fixed per image, not environment-driven.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Display name used in progress lines.
    pub name: String,

    /// Cache host name (compose service name).
    pub host: String,

    /// Cache port.
    pub port: u16,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "Redis".to_string(),
            host: "redis".to_string(),
            port: 6379,
        }
    }
}

/// Readiness poll configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Sleep between probe attempts in milliseconds.
    pub poll_interval_ms: u64,

    /// Upper bound on a single connect attempt in milliseconds.
    pub connect_timeout_ms: u64,
}

impl ReadinessConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            connect_timeout_ms: 1000,
        }
    }
}

/// Bootstrap configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Application code root; working directory for every later step.
    pub app_root: PathBuf,

    /// Management command prefix, e.g. `["python", "manage.py"]`.
    pub manage: Vec<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            app_root: PathBuf::from("/app/backend"),
            manage: vec!["python".to_string(), "manage.py".to_string()],
        }
    }
}

/// Data import step configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ImportConfig {
    /// Management subcommand that loads the CSV.
    pub command: String,

    /// CSV file passed via `--csv-file`.
    pub csv_file: PathBuf,

    /// Variable that overrides `csv_file` when set.
    pub csv_env_var: String,

    /// Pass `--force` to reload already imported data.
    pub force: bool,

    /// Pass `--batch-size N` when set.
    pub batch_size: Option<u32>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            command: "import_stations".to_string(),
            csv_file: PathBuf::from("/app/data/fuel-prices-for-be-assessment.csv"),
            csv_env_var: "CSV_FILE".to_string(),
            force: false,
            batch_size: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Human-readable lines or one JSON object per line.
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
