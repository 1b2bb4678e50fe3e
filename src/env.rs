//! Process environment snapshot.
//!
//! The environment is captured once at startup and only read afterwards,
//! so every decision the sequencer makes is a function of this snapshot.

use std::collections::HashMap;

use crate::lifecycle::SequenceError;

/// Read-only view of the variables the entrypoint was started with.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    vars: HashMap<String, String>,
}

impl ProcessEnv {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Look up a variable that an enabled step depends on.
    pub fn require(&self, name: &str) -> Result<&str, SequenceError> {
        self.get(name)
            .ok_or_else(|| SequenceError::MissingVariable(name.to_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for ProcessEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_require() {
        let env: ProcessEnv = [("SQL_HOST", "db")].into_iter().collect();
        assert_eq!(env.get("SQL_HOST"), Some("db"));
        assert_eq!(env.require("SQL_HOST").unwrap(), "db");
        assert!(matches!(
            env.require("SQL_PORT"),
            Err(SequenceError::MissingVariable(name)) if name == "SQL_PORT"
        ));
    }

    #[test]
    fn test_capture_sees_process_variables() {
        let env = ProcessEnv::capture();
        assert_eq!(env.get("PATH").is_some(), std::env::var_os("PATH").is_some());
    }
}
