//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events on stdout)
//!
//! Consumers:
//!     → container log driver (docker logs, journald, shippers)
//! ```
//!
//! # Design Decisions
//! - Progress lines are the operator interface: the last line names the
//!   step the container is blocked on
//! - Probe failures stay at trace level so waiting is quiet

pub mod logging;

pub use logging::init_logging;
