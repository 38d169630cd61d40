//! Explicit process-environment context
//!
//! The process environment table is the one piece of mutable shared state in a
//! run: every loader reads it for overwrite-skip checks and writes resolved
//! values into it so later sources can observe them. Passing it as a trait
//! object instead of touching `std::env` directly keeps the loaders testable
//! against an in-memory table.

use std::collections::HashMap;
use std::sync::Mutex;

/// Mutable environment-variable table
pub trait Environment: Send + Sync {
    /// Reads a variable
    fn get(&self, name: &str) -> Option<String>;

    /// Writes a variable
    fn set(&self, name: &str, value: &str);

    /// Returns true if the variable is set
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// The real process environment
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set(&self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

/// In-memory environment table used by tests
#[derive(Default)]
pub struct MemoryEnvironment {
    vars: Mutex<HashMap<String, String>>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table pre-populated with the given variables
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Mutex::new(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl Environment for MemoryEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.lock().expect("environment lock").get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        self.vars
            .lock()
            .expect("environment lock")
            .insert(name.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_memory_environment_roundtrip() {
        let env = MemoryEnvironment::new();
        assert!(!env.contains("FOO"));
        env.set("FOO", "bar");
        assert_eq!(env.get("FOO"), Some("bar".to_string()));
        assert!(env.contains("FOO"));
    }

    #[test]
    fn test_memory_environment_with_vars() {
        let env = MemoryEnvironment::with_vars([("A", "1"), ("B", "2")]);
        assert_eq!(env.get("A"), Some("1".to_string()));
        assert_eq!(env.get("B"), Some("2".to_string()));
    }

    #[test]
    #[serial]
    fn test_process_environment_roundtrip() {
        temp_env::with_var_unset("ENVIX_TEST_PROCESS_ENV", || {
            let env = ProcessEnvironment;
            assert!(!env.contains("ENVIX_TEST_PROCESS_ENV"));
            env.set("ENVIX_TEST_PROCESS_ENV", "set");
            assert_eq!(env.get("ENVIX_TEST_PROCESS_ENV"), Some("set".to_string()));
        });
    }
}
