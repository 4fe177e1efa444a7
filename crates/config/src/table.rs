//! Environment tables that loaded entries are written into.
//!
//! Responsibilities:
//! - Define the `EnvTable` seam used by loaders and typed accessors.
//! - Provide `ProcessEnv`, backed by the real process environment.
//! - Provide `MemoryEnv`, an in-memory table for tests and dry runs.
//!
//! Does NOT handle:
//! - Type conversion of stored values (see `accessor`).
//! - Synchronisation. The process environment is global mutable state and
//!   concurrent loads may observe each other's partial writes.
//!
//! Invariants:
//! - Keys are case-sensitive and the last write wins.
//! - `ProcessEnv` never panics on keys or values the OS cannot store; it skips them.

use std::collections::BTreeMap;

use crate::accessor::{EnvValue, lookup, nested_key};

/// A mutable key/value table with environment-variable semantics.
pub trait EnvTable {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Returns false if the table refused the entry.
    fn set(&mut self, key: &str, value: &str) -> bool;

    /// Reads `key` converted to `T`, or `default` when absent, empty or unparsable.
    fn get_or<T: EnvValue>(&self, key: &str, default: T) -> T
    where
        Self: Sized,
    {
        lookup(self, key, default)
    }

    /// Like [`EnvTable::get_or`], translating `db.host` to `DB_HOST` first.
    fn get_nested_or<T: EnvValue>(&self, dotted: &str, default: T) -> T
    where
        Self: Sized,
    {
        lookup(self, &nested_key(dotted), default)
    }
}

impl<E: EnvTable + ?Sized> EnvTable for &mut E {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Returns true if the OS can store `key` as an environment variable name.
    fn is_storable_key(key: &str) -> bool {
        !key.is_empty() && !key.contains(['=', '\0'])
    }
}

impl EnvTable for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        if !Self::is_storable_key(key) {
            return None;
        }
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if !Self::is_storable_key(key) || value.contains('\0') {
            tracing::warn!(key = %key, "Skipping entry the process environment cannot store");
            return false;
        }
        // SAFETY: loading is documented as single-threaded; callers that mutate the
        // environment from several threads accept the platform's guarantees.
        unsafe {
            std::env::set_var(key, value);
        }
        true
    }
}

/// An ordered in-memory environment table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every entry into another table, e.g. the process environment.
    pub fn apply_to(&self, target: &mut impl EnvTable) {
        for (key, value) in self.iter() {
            target.set(key, value);
        }
    }
}

impl EnvTable for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.vars.insert(key.to_string(), value.to_string());
        true
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
