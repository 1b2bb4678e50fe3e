//! Handing the process over to the payload command.
//!
//! # Design Decisions
//! - Unix: replace the process image so the payload keeps our PID,
//!   receives signals directly and owns the exit status
//! - Elsewhere: run the payload as a child, kill it on Ctrl-C and exit
//!   with its status
//! - An empty payload behaves like `exec` with no arguments: success

use crate::lifecycle::error::spawn_exit_code;
use crate::lifecycle::Handoff;

/// Hand control to the payload.
///
/// On unix this only returns if the payload could not be started; the
/// value is the exit code the entrypoint should terminate with.
pub async fn exec(handoff: Handoff) -> i32 {
    let Some((program, args)) = handoff.argv.split_first() else {
        tracing::info!("No payload command given, nothing to start");
        return 0;
    };

    tracing::info!(
        command = %handoff.argv.join(" "),
        cwd = %handoff.cwd.display(),
        "Starting payload"
    );

    replace_process(program, args, &handoff).await
}

#[cfg(unix)]
async fn replace_process(program: &str, args: &[String], handoff: &Handoff) -> i32 {
    use std::os::unix::process::CommandExt;

    let err = std::process::Command::new(program)
        .args(args)
        .current_dir(&handoff.cwd)
        .exec();

    tracing::error!(program = %program, error = %err, "Failed to exec payload");
    spawn_exit_code(&err)
}

#[cfg(not(unix))]
async fn replace_process(program: &str, args: &[String], handoff: &Handoff) -> i32 {
    use crate::bootstrap::launcher::exit_code;

    let mut child = match tokio::process::Command::new(program)
        .args(args)
        .current_dir(&handoff.cwd)
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            tracing::error!(program = %program, error = %err, "Failed to start payload");
            return spawn_exit_code(&err);
        }
    };

    let status = tokio::select! {
        status = child.wait() => status,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, stopping payload");
            let _ = child.kill().await;
            child.wait().await
        }
    };

    match status {
        Ok(status) => exit_code(status),
        Err(err) => {
            tracing::error!(error = %err, "Failed to wait for payload");
            crate::lifecycle::error::EXIT_FAILURE
        }
    }
}
