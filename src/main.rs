//! Container entrypoint for the fuel-station web service.
//!
//! # Startup Sequence
//!
//! ```text
//!   container start
//!        │
//!        ▼
//!   DATABASE == "postgres"? ──no──┐
//!        │ yes                    │
//!        ▼                        │
//!   wait SQL_HOST:SQL_PORT        │
//!        │                        │
//!        ▼◀───────────────────────┘
//!   wait redis:6379
//!        │
//!        ▼
//!   cd /app/backend ─────────────────────┐
//!        │                               │
//!        ▼                               │
//!   migrate → import_stations            │  any failure:
//!   → createcachetable → collectstatic ──┤  exit with its code
//!        │                               │
//!        ▼                               ▼
//!   exec payload                      aborted
//! ```

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use container_entrypoint::bootstrap::ProcessLauncher;
use container_entrypoint::config::loader::load_or_default;
use container_entrypoint::config::{EntrypointConfig, ObservabilityConfig};
use container_entrypoint::lifecycle::error::EXIT_FAILURE;
use container_entrypoint::lifecycle::handoff;
use container_entrypoint::observability::init_logging;
use container_entrypoint::readiness::{await_reachable, ServiceEndpoint, TcpProbe};
use container_entrypoint::{ProcessEnv, Sequencer, StartupPlan};

#[derive(Parser)]
#[command(name = "container-entrypoint", version)]
#[command(about = "Wait for dependencies, bootstrap the app, then exec the server", long_about = None)]
struct Cli {
    /// TOML config file; built-in image defaults when omitted
    #[arg(short, long, env = "ENTRYPOINT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full startup sequence and hand off to PAYLOAD
    Run {
        /// Server command, e.g. `-- gunicorn backend.wsgi:application`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        payload: Vec<String>,
    },
    /// Block until every HOST:PORT accepts TCP connections, in order
    Wait {
        #[arg(required = true, value_parser = ServiceEndpoint::parse)]
        endpoints: Vec<ServiceEndpoint>,
    },
    /// Print the resolved startup plan without running anything
    Plan {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            process::exit(EXIT_FAILURE);
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let code = match cli.command {
        Commands::Run { payload } => run(&config, payload).await,
        Commands::Wait { endpoints } => wait(&config, &endpoints).await,
        Commands::Plan { json } => plan(&config, json),
    };

    process::exit(code);
}

async fn run(config: &EntrypointConfig, payload: Vec<String>) -> i32 {
    let env = ProcessEnv::capture();
    let probe = TcpProbe::new(config.readiness.connect_timeout());
    let sequencer = Sequencer::new(config, probe, ProcessLauncher);

    match sequencer.run(&env, payload).await {
        Ok(target) => handoff::exec(target).await,
        Err(e) => {
            tracing::error!(error = %e, "Startup aborted");
            e.exit_code()
        }
    }
}

async fn wait(config: &EntrypointConfig, endpoints: &[ServiceEndpoint]) -> i32 {
    let probe = TcpProbe::new(config.readiness.connect_timeout());
    for endpoint in endpoints {
        await_reachable(&probe, endpoint, config.readiness.poll_interval()).await;
    }
    0
}

fn plan(config: &EntrypointConfig, json: bool) -> i32 {
    let plan = match StartupPlan::resolve(config, &ProcessEnv::capture()) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!(error = %e, "Cannot resolve startup plan");
            return e.exit_code();
        }
    };

    if !json {
        println!("{plan}");
        return 0;
    }

    match serde_json::to_string_pretty(&plan) {
        Ok(out) => {
            println!("{out}");
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize plan");
            EXIT_FAILURE
        }
    }
}
