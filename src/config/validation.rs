//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, ports non-zero)
//! - Reject empty names the sequencer would otherwise look up
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EntrypointConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::EntrypointConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must not be zero")]
    Zero(&'static str),
}

pub fn validate_config(config: &EntrypointConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let names = [
        ("database.selector_var", &config.database.selector_var),
        ("database.expected", &config.database.expected),
        ("database.host_var", &config.database.host_var),
        ("database.port_var", &config.database.port_var),
        ("cache.host", &config.cache.host),
        ("import.command", &config.import.command),
    ];
    for (field, value) in names {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty(field));
        }
    }

    if config.cache.port == 0 {
        errors.push(ValidationError::Zero("cache.port"));
    }
    if config.readiness.poll_interval_ms == 0 {
        errors.push(ValidationError::Zero("readiness.poll_interval_ms"));
    }
    if config.readiness.connect_timeout_ms == 0 {
        errors.push(ValidationError::Zero("readiness.connect_timeout_ms"));
    }
    if config.import.batch_size == Some(0) {
        errors.push(ValidationError::Zero("import.batch_size"));
    }

    if config.bootstrap.manage.first().map_or(true, |p| p.trim().is_empty()) {
        errors.push(ValidationError::Empty("bootstrap.manage"));
    }
    if config.bootstrap.app_root.as_os_str().is_empty() {
        errors.push(ValidationError::Empty("bootstrap.app_root"));
    }
    if config.import.csv_file.as_os_str().is_empty() {
        errors.push(ValidationError::Empty("import.csv_file"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
