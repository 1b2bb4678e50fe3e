//! Connection-level readiness probing.
//!
//! # Responsibilities
//! - Attempt one TCP connect per probe, bounded by a short timeout
//! - Repeat probes at a fixed interval until one succeeds

use std::future::Future;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time;

use crate::readiness::ServiceEndpoint;

/// A single readiness check against an endpoint.
pub trait Probe {
    fn is_reachable(&self, endpoint: &ServiceEndpoint) -> impl Future<Output = bool>;
}

/// Probe that succeeds when a TCP connection is accepted.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    connect_timeout: Duration,
}

impl TcpProbe {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Probe for TcpProbe {
    async fn is_reachable(&self, endpoint: &ServiceEndpoint) -> bool {
        let connect = TcpStream::connect(endpoint.address());
        match time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                tracing::trace!(endpoint = %endpoint, error = %e, "Probe refused");
                false
            }
            Err(_) => {
                tracing::trace!(endpoint = %endpoint, "Probe timed out");
                false
            }
        }
    }
}

/// Block until `endpoint` accepts a connection.
///
/// There is no upper bound on attempts. Returns the number of probes made.
pub async fn await_reachable<P: Probe>(
    probe: &P,
    endpoint: &ServiceEndpoint,
    interval: Duration,
) -> u64 {
    tracing::info!(
        host = %endpoint.host,
        port = endpoint.port,
        "Waiting for {}...",
        endpoint.name
    );

    let mut attempts = 0u64;
    loop {
        attempts += 1;
        if probe.is_reachable(endpoint).await {
            break;
        }
        time::sleep(interval).await;
    }

    tracing::info!(attempts, "{} started", endpoint.name);
    attempts
}
