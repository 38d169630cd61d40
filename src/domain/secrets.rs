//! Ordered mapping of resolved secrets
//!
//! Output renderers iterate resolved values in the order the config declared
//! them, so the aggregate mapping preserves insertion order. Overwriting an
//! existing key replaces the value in place and keeps the original position.

use crate::config::secret::SecretString;
use crate::domain::EnvName;
use secrecy::ExposeSecret;

/// Insertion-ordered mapping from environment variable name to secret value
#[derive(Default)]
pub struct Secrets {
    entries: Vec<(EnvName, SecretString)>,
}

impl Secrets {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value
    ///
    /// A replaced key keeps its original insertion position.
    pub fn insert(&mut self, name: EnvName, value: SecretString) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Looks up a value by name
    pub fn get(&self, name: &str) -> Option<&SecretString> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Returns true if the name has a resolved value
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&EnvName, &SecretString)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &EnvName> {
        self.entries.iter().map(|(n, _)| n)
    }

    /// Number of resolved values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been resolved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges another mapping into this one, later values winning
    pub fn extend(&mut self, other: Secrets) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Values stay redacted; only the key set is printed.
        f.debug_list().entries(self.names()).finish()
    }
}
