//! Method registry: the ordered table of `(key, handler)` entries.
//!
//! Entries are kept in insertion order and searched linearly with deep
//! equality. Registering a key that is already present replaces its handler
//! in place, so the table never holds two entries with equal keys.

use multimethod_core::{Handler, Value};

/// A registered `(key, handler)` pair.
#[derive(Debug, Clone)]
pub struct MatchEntry {
    key: Value,
    handler: Handler,
}

impl MatchEntry {
    /// The value a derived dispatch key must equal to select this entry.
    pub fn key(&self) -> &Value {
        &self.key
    }

    /// The handler selected by this entry.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

/// An ordered collection of match entries with unique keys.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    entries: Vec<MatchEntry>,
}

impl MethodRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == *key)
    }

    /// Insert a handler for `key`, or replace the handler of the entry whose
    /// key deep-equals `key`.
    ///
    /// A replaced entry keeps its position. Returns the previous handler.
    pub fn register(&mut self, key: Value, handler: Handler) -> Option<Handler> {
        match self.position(&key) {
            Some(index) => {
                let entry = &mut self.entries[index];
                Some(std::mem::replace(&mut entry.handler, handler))
            }
            None => {
                self.entries.push(MatchEntry { key, handler });
                None
            }
        }
    }

    /// Remove the entry whose key deep-equals `key`, if any.
    pub fn remove(&mut self, key: &Value) -> Option<Handler> {
        self.position(key)
            .map(|index| self.entries.remove(index).handler)
    }

    /// Find the handler registered for `key`.
    pub fn lookup(&self, key: &Value) -> Option<&Handler> {
        let mut matches = self.entries.iter().filter(|entry| entry.key == *key);
        let found = matches.next();
        debug_assert!(
            matches.next().is_none(),
            "registry holds more than one entry for key {key}"
        );
        found.map(|entry| &entry.handler)
    }

    /// Check whether an entry exists for `key`.
    pub fn contains(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchEntry> {
        self.entries.iter()
    }

    /// Iterate over registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(MatchEntry::key)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a MethodRegistry {
    type Item = &'a MatchEntry;
    type IntoIter = std::slice::Iter<'a, MatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
