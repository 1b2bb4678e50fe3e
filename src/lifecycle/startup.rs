//! Startup orchestration.
//!
//! # Responsibilities
//! - Gate startup on the database (when selected) and the cache
//! - Enter the application code root
//! - Run the bootstrap steps in order
//! - Produce the payload to hand off to
//!
//! # Design Decisions
//! - Fail fast: the first failing step ends the sequence with its code
//! - Steps run one after another on a single task, never concurrently
//! - Waits are unbounded; only steps after them can fail

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::bootstrap::{BootstrapPlan, Launcher};
use crate::config::EntrypointConfig;
use crate::env::ProcessEnv;
use crate::lifecycle::SequenceError;
use crate::readiness::{await_reachable, Probe, ServiceEndpoint};

/// The payload command and the directory it starts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub argv: Vec<String>,
    pub cwd: PathBuf,
}

/// Everything the sequencer will do, resolved before it does any of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupPlan {
    pub database: Option<ServiceEndpoint>,
    pub cache: ServiceEndpoint,
    #[serde(flatten)]
    pub bootstrap: BootstrapPlan,
}

impl StartupPlan {
    pub fn resolve(config: &EntrypointConfig, env: &ProcessEnv) -> Result<Self, SequenceError> {
        Ok(Self {
            database: ServiceEndpoint::database(&config.database, env)?,
            cache: ServiceEndpoint::cache(&config.cache),
            bootstrap: BootstrapPlan::resolve(config, env),
        })
    }
}

impl fmt::Display for StartupPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(database) = &self.database {
            writeln!(f, "wait  {database}")?;
        }
        writeln!(f, "wait  {}", self.cache)?;
        writeln!(f, "cd    {}", self.bootstrap.app_root.display())?;
        for step in &self.bootstrap.steps {
            writeln!(f, "run   {}", step.command_line())?;
        }
        f.write_str("exec  <payload>")
    }
}

/// Drives a container from "dependencies maybe down" to "payload ready".
pub struct Sequencer<'a, P, L> {
    config: &'a EntrypointConfig,
    probe: P,
    launcher: L,
}

impl<'a, P: Probe, L: Launcher> Sequencer<'a, P, L> {
    pub fn new(config: &'a EntrypointConfig, probe: P, launcher: L) -> Self {
        Self {
            config,
            probe,
            launcher,
        }
    }

    /// Run every step up to, but not including, the handoff.
    pub async fn run(
        &self,
        env: &ProcessEnv,
        payload: Vec<String>,
    ) -> Result<Handoff, SequenceError> {
        let interval = self.config.readiness.poll_interval();
        let plan = StartupPlan::resolve(self.config, env)?;

        match &plan.database {
            Some(database) => {
                await_reachable(&self.probe, database, interval).await;
            }
            None => tracing::debug!(
                selector = %self.config.database.selector_var,
                "Database wait not requested"
            ),
        }

        await_reachable(&self.probe, &plan.cache, interval).await;

        let plan = plan.bootstrap;
        enter_code_root(&plan.app_root)?;

        for step in &plan.steps {
            tracing::info!(step = %step.name, "{}", step.description);

            let code = self
                .launcher
                .run(step, &plan.app_root)
                .await
                .map_err(|source| SequenceError::Spawn {
                    step: step.name.clone(),
                    source,
                })?;

            if code != 0 {
                tracing::error!(step = %step.name, code, "Bootstrap step failed");
                return Err(SequenceError::StepFailed {
                    step: step.name.clone(),
                    code,
                });
            }
        }

        Ok(Handoff {
            argv: payload,
            cwd: plan.app_root,
        })
    }
}

fn enter_code_root(path: &Path) -> Result<(), SequenceError> {
    let metadata = std::fs::metadata(path).map_err(|source| SequenceError::CodeRoot {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(SequenceError::NotADirectory(path.to_path_buf()));
    }
    tracing::debug!(path = %path.display(), "Entered code root");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_text_lists_every_stage() {
        let env: ProcessEnv = [("DATABASE", "postgres"), ("SQL_HOST", "db"), ("SQL_PORT", "5432")]
            .into_iter()
            .collect();
        let plan = StartupPlan::resolve(&EntrypointConfig::default(), &env).unwrap();
        let text = plan.to_string();
        let verbs: Vec<_> = text.lines().map(|l| l.split_whitespace().next().unwrap()).collect();
        assert_eq!(verbs, vec!["wait", "wait", "cd", "run", "run", "run", "run", "exec"]);
        assert!(text.starts_with("wait  PostgreSQL (db:5432)\nwait  Redis (redis:6379)\n"));
    }

    #[test]
    fn test_plan_json_flattens_bootstrap() {
        let plan = StartupPlan::resolve(&EntrypointConfig::default(), &ProcessEnv::default()).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json["database"].is_null());
        assert_eq!(json["cache"]["port"], 6379);
        assert_eq!(json["app_root"], "/app/backend");
        assert_eq!(json["steps"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_code_root_must_be_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(enter_code_root(dir.path()).is_ok());

        let file = dir.path().join("manage.py");
        std::fs::write(&file, "").unwrap();
        assert!(matches!(enter_code_root(&file), Err(SequenceError::NotADirectory(_))));

        let missing = dir.path().join("missing");
        assert!(matches!(enter_code_root(&missing), Err(SequenceError::CodeRoot { .. })));
    }
}
