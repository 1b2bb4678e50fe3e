//! Dependency readiness gating.
//!
//! # Data Flow
//! ```text
//! Endpoint resolution (endpoint.rs):
//!     DatabaseConfig + ProcessEnv → Option<ServiceEndpoint>
//!     CacheConfig                 → ServiceEndpoint
//!
//! Wait loop (probe.rs):
//!     probe endpoint
//!     → reachable?   yes → log "<name> started", return
//!                    no  → sleep(poll interval), probe again
//! ```
//!
//! # Design Decisions
//! - Connection-level check only: connect, then drop; no protocol bytes
//! - No retry bound; liveness is the orchestrator's call
//! - Unreachable is not an error and is only visible at trace level

pub mod endpoint;
pub mod probe;

pub use endpoint::{EndpointParseError, ServiceEndpoint};
pub use probe::{await_reachable, Probe, TcpProbe};
