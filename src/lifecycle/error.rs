//! Startup failure taxonomy.
//!
//! Waiting on an unreachable dependency is never an error; only the
//! conditions below abort startup. Each maps to the exit code a POSIX
//! shell running the same sequence under `set -e` would report.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit code used for failures that have no child status to propagate.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a command that exists but cannot be executed.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Exit code for a command that cannot be found.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Errors that abort the startup sequence.
#[derive(Debug, Error)]
pub enum SequenceError {
    /// A variable required by an enabled gate is absent.
    #[error("environment variable {0} is not set")]
    MissingVariable(String),

    /// The database port variable does not hold a usable port.
    #[error("environment variable {var} is not a valid port: {value:?}")]
    InvalidPort { var: String, value: String },

    /// The code root cannot be inspected.
    #[error("cannot enter {path}: {source}")]
    CodeRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The code root exists but is not a directory.
    #[error("cannot enter {0}: not a directory")]
    NotADirectory(PathBuf),

    /// A bootstrap step could not be started at all.
    #[error("{step} could not be started: {source}")]
    Spawn {
        step: String,
        #[source]
        source: io::Error,
    },

    /// A bootstrap step ran and exited nonzero.
    #[error("{step} exited with status {code}")]
    StepFailed { step: String, code: i32 },
}

impl SequenceError {
    /// Exit code the entrypoint terminates with for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            SequenceError::StepFailed { code, .. } => *code,
            SequenceError::Spawn { source, .. } => spawn_exit_code(source),
            _ => EXIT_FAILURE,
        }
    }
}

/// Shell convention for a command that could not be launched.
pub fn spawn_exit_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::NotFound => EXIT_NOT_FOUND,
        _ => EXIT_NOT_EXECUTABLE,
    }
}
