//! Container Entrypoint Library
//!
//! Startup sequencing for the fuel-station web service container: wait for
//! PostgreSQL (when selected) and Redis, run the one-time management
//! commands, then replace this process with the server.

pub mod bootstrap;
pub mod config;
pub mod env;
pub mod lifecycle;
pub mod observability;
pub mod readiness;

pub use config::EntrypointConfig;
pub use env::ProcessEnv;
pub use lifecycle::{Handoff, SequenceError, Sequencer, StartupPlan};
