//! Ordered bootstrap plan.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::EntrypointConfig;
use crate::env::ProcessEnv;

/// One management command in the bootstrap sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Short identifier, also the management subcommand.
    pub name: String,
    /// Progress line printed before the step runs.
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
}

impl Step {
    fn manage(manage: &[String], name: &str, description: &str, extra: &[String]) -> Self {
        let (program, prefix) = manage
            .split_first()
            .map(|(p, rest)| (p.clone(), rest.to_vec()))
            .unwrap_or_default();
        let mut args = prefix;
        args.push(name.to_string());
        args.extend_from_slice(extra);

        Self {
            name: name.to_string(),
            description: description.to_string(),
            program,
            args,
        }
    }

    /// Full command line, for logs and `plan` output.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The fixed bootstrap sequence, resolved against config and environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapPlan {
    pub app_root: PathBuf,
    pub steps: Vec<Step>,
}

impl BootstrapPlan {
    pub fn resolve(config: &EntrypointConfig, env: &ProcessEnv) -> Self {
        let manage = &config.bootstrap.manage;
        let import = &config.import;

        let csv_file = env
            .get(&import.csv_env_var)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| import.csv_file.clone());

        let mut import_args = vec![
            "--csv-file".to_string(),
            csv_file.to_string_lossy().into_owned(),
        ];
        if import.force {
            import_args.push("--force".to_string());
        }
        if let Some(batch_size) = import.batch_size {
            import_args.push("--batch-size".to_string());
            import_args.push(batch_size.to_string());
        }

        let steps = vec![
            Step::manage(
                manage,
                "migrate",
                "Applying database migrations",
                &["--noinput".to_string()],
            ),
            Step::manage(manage, &import.command, "Importing fuel station data", &import_args),
            Step::manage(manage, "createcachetable", "Creating cache table", &[]),
            Step::manage(
                manage,
                "collectstatic",
                "Collecting static files",
                &["--noinput".to_string()],
            ),
        ];

        Self {
            app_root: config.bootstrap.app_root.clone(),
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_matches_image_entrypoint() {
        let plan = BootstrapPlan::resolve(&EntrypointConfig::default(), &ProcessEnv::default());

        assert_eq!(plan.app_root, PathBuf::from("/app/backend"));
        let lines: Vec<_> = plan.steps.iter().map(Step::command_line).collect();
        assert_eq!(
            lines,
            vec![
                "python manage.py migrate --noinput",
                "python manage.py import_stations --csv-file /app/data/fuel-prices-for-be-assessment.csv",
                "python manage.py createcachetable",
                "python manage.py collectstatic --noinput",
            ]
        );
    }

    #[test]
    fn test_csv_variable_overrides_configured_path() {
        let env: ProcessEnv = [("CSV_FILE", "/data/prices.csv")].into_iter().collect();
        let plan = BootstrapPlan::resolve(&EntrypointConfig::default(), &env);
        assert_eq!(plan.steps[1].args[3], "/data/prices.csv");

        let empty: ProcessEnv = [("CSV_FILE", "")].into_iter().collect();
        let plan = BootstrapPlan::resolve(&EntrypointConfig::default(), &empty);
        assert_eq!(plan.steps[1].args[3], "/app/data/fuel-prices-for-be-assessment.csv");
    }

    #[test]
    fn test_import_flags() {
        let mut config = EntrypointConfig::default();
        config.import.force = true;
        config.import.batch_size = Some(500);
        config.bootstrap.manage = vec!["/venv/bin/django-admin".into()];

        let plan = BootstrapPlan::resolve(&config, &ProcessEnv::default());
        assert_eq!(plan.steps[1].program, "/venv/bin/django-admin");
        assert_eq!(
            plan.steps[1].args,
            vec![
                "import_stations",
                "--csv-file",
                "/app/data/fuel-prices-for-be-assessment.csv",
                "--force",
                "--batch-size",
                "500",
            ]
        );
    }
}
