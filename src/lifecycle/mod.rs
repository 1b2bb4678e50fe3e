//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     [database wait] → cache wait → enter code root
//!     → migrate → import → createcachetable → collectstatic
//!
//! Handoff (handoff.rs):
//!     payload argv → exec (process replaced, no wrapper left behind)
//!
//! Errors (error.rs):
//!     first failing step → SequenceError → process exit code
//! ```
//!
//! # Design Decisions
//! - Ordered startup: step N+1 never begins before step N succeeded
//! - No rollback: a failed container is restarted by the orchestrator
//! - Signals are not intercepted before the handoff

pub mod error;
pub mod handoff;
pub mod startup;

pub use error::SequenceError;
pub use startup::{Handoff, Sequencer, StartupPlan};
