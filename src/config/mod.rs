//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → EntrypointConfig (validated, immutable)
//!     → shared by reference with the sequencer
//!
//! No config file:
//!     → EntrypointConfig::default() (the container image defaults)
//! ```
//!
//! # Design Decisions
//! - Config is read once per container start; there is no reload
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks
//! - Cache endpoint lives here, never in the process environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BootstrapConfig;
pub use schema::CacheConfig;
pub use schema::DatabaseConfig;
pub use schema::EntrypointConfig;
pub use schema::ImportConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ReadinessConfig;
