//! One-time bootstrap steps run before the payload starts.
//!
//! # Data Flow
//! ```text
//! Plan (plan.rs):
//!     EntrypointConfig + ProcessEnv
//!     → migrate → import → createcachetable → collectstatic
//!
//! Launch (launcher.rs):
//!     Step → child process (inherited stdio, code root as cwd)
//!     → exit code (signals mapped to 128 + signo)
//! ```
//!
//! # Design Decisions
//! - Steps are opaque commands; only their exit code is interpreted
//! - Non-interactive flags are part of the plan, not the launcher
//! - Idempotency of each step belongs to the command, not to us

pub mod launcher;
pub mod plan;

pub use launcher::{Launcher, ProcessLauncher};
pub use plan::{BootstrapPlan, Step};
