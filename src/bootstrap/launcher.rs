//! Child process execution for bootstrap steps.

use std::future::Future;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use crate::bootstrap::Step;
use crate::lifecycle::error::EXIT_FAILURE;

/// Runs one bootstrap step to completion.
pub trait Launcher {
    /// Run `step` with `cwd` as working directory and return its exit code.
    ///
    /// `Err` means the step could not be started at all.
    fn run(&self, step: &Step, cwd: &Path) -> impl Future<Output = io::Result<i32>>;
}

/// Launcher that spawns real child processes.
///
/// Children inherit the entrypoint's environment and standard streams, so
/// their output interleaves with the progress lines.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    async fn run(&self, step: &Step, cwd: &Path) -> io::Result<i32> {
        tracing::debug!(step = %step.name, command = %step.command_line(), "spawn");

        let mut child = Command::new(&step.program)
            .args(&step.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        let status = child.wait().await?;
        let code = exit_code(status);
        tracing::debug!(step = %step.name, code, "exit");
        Ok(code)
    }
}

/// Exit code as a POSIX shell reports it: signal deaths become `128 + signo`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    EXIT_FAILURE
}
