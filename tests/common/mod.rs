//! Shared utilities for sequencer integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use container_entrypoint::bootstrap::{Launcher, Step};
use container_entrypoint::config::EntrypointConfig;
use container_entrypoint::readiness::{Probe, ServiceEndpoint, TcpProbe};

/// One recorded launcher invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub step: String,
    pub cwd: PathBuf,
    /// Value of the witness flag when the step started.
    pub witnessed: bool,
}

/// Launcher stub that records calls and returns scripted exit codes.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    calls: Arc<Mutex<Vec<Call>>>,
    codes: HashMap<String, i32>,
    missing: Option<String>,
    witness: Option<Arc<AtomicBool>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `step` exit with `code`.
    pub fn failing(mut self, step: &str, code: i32) -> Self {
        self.codes.insert(step.to_string(), code);
        self
    }

    /// Make `step` fail to spawn with `NotFound`.
    pub fn missing(mut self, step: &str) -> Self {
        self.missing = Some(step.to_string());
        self
    }

    /// Record the value of `flag` at the start of every step.
    pub fn witness(mut self, flag: Arc<AtomicBool>) -> Self {
        self.witness = Some(flag);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn steps(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.step).collect()
    }
}

impl Launcher for RecordingLauncher {
    async fn run(&self, step: &Step, cwd: &Path) -> io::Result<i32> {
        self.calls.lock().unwrap().push(Call {
            step: step.name.clone(),
            cwd: cwd.to_path_buf(),
            witnessed: self
                .witness
                .as_ref()
                .map_or(false, |w| w.load(Ordering::SeqCst)),
        });

        if self.missing.as_deref() == Some(step.name.as_str()) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        Ok(self.codes.get(&step.name).copied().unwrap_or(0))
    }
}

/// Real TCP probe that also records which endpoints it was asked about.
#[derive(Clone)]
pub struct RecordingProbe {
    inner: TcpProbe,
    probed: Arc<Mutex<Vec<String>>>,
}

impl RecordingProbe {
    pub fn new() -> Self {
        Self {
            inner: TcpProbe::new(Duration::from_millis(200)),
            probed: Arc::default(),
        }
    }

    /// Distinct endpoint names in first-probe order.
    pub fn endpoints(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for name in self.probed.lock().unwrap().iter() {
            if !seen.contains(name) {
                seen.push(name.clone());
            }
        }
        seen
    }
}

impl Probe for RecordingProbe {
    async fn is_reachable(&self, endpoint: &ServiceEndpoint) -> bool {
        self.probed.lock().unwrap().push(endpoint.name.clone());
        self.inner.is_reachable(endpoint).await
    }
}

/// Bind a loopback listener on an ephemeral port.
pub fn listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let (listener, port) = listener();
    drop(listener);
    port
}

/// Config pointing the cache gate at `cache_port` and the code root at `app_root`.
pub fn test_config(cache_port: u16, app_root: &Path) -> EntrypointConfig {
    let mut config = EntrypointConfig::default();
    config.cache.host = "127.0.0.1".to_string();
    config.cache.port = cache_port;
    config.readiness.poll_interval_ms = 20;
    config.bootstrap.app_root = app_root.to_path_buf();
    config
}
