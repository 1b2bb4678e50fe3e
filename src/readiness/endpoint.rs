//! Service endpoints the sequencer waits for.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::config::{CacheConfig, DatabaseConfig};
use crate::env::ProcessEnv;
use crate::lifecycle::SequenceError;

/// A dependency identified by host, port and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEndpoint {
    pub name: String,
    pub host: String,
    pub port: u16,
}

/// Error for `host:port` strings given on the command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointParseError {
    #[error("expected HOST:PORT, got {0:?}")]
    MissingPort(String),

    #[error("invalid port in {0:?}")]
    InvalidPort(String),
}

impl ServiceEndpoint {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }

    /// `host:port` form accepted by `TcpStream::connect`.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Resolve the database endpoint, if the environment asks for one.
    ///
    /// Returns `Ok(None)` unless the selector variable equals the expected
    /// literal exactly. Once enabled, host and port become mandatory.
    pub fn database(
        config: &DatabaseConfig,
        env: &ProcessEnv,
    ) -> Result<Option<Self>, SequenceError> {
        if env.get(&config.selector_var) != Some(config.expected.as_str()) {
            return Ok(None);
        }

        let host = env.require(&config.host_var)?;
        let raw_port = env.require(&config.port_var)?;
        let port = parse_port(raw_port).ok_or_else(|| SequenceError::InvalidPort {
            var: config.port_var.clone(),
            value: raw_port.to_string(),
        })?;

        Ok(Some(Self::new(&config.name, host, port)))
    }

    pub fn cache(config: &CacheConfig) -> Self {
        Self::new(&config.name, &config.host, config.port)
    }

    /// Parse `host:port`, using the whole string as display name.
    pub fn parse(input: &str) -> Result<Self, EndpointParseError> {
        let (host, port) = input
            .rsplit_once(':')
            .filter(|(host, _)| !host.is_empty())
            .ok_or_else(|| EndpointParseError::MissingPort(input.to_string()))?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let port = parse_port(port).ok_or_else(|| EndpointParseError::InvalidPort(input.to_string()))?;
        Ok(Self::new(input, host, port))
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|p| *p != 0)
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address())
    }
}
