//! Duplicate-checked named registries.

use std::collections::HashMap;
use tracing::info;
use waypoint_core::RegistrationError;

/// A name-keyed registry populated during initialization and read-only
/// afterwards. Duplicate and blank names are fatal.
pub(crate) struct NamedRegistry<V> {
    kind: &'static str,
    entries: HashMap<String, V>,
}

impl<V> NamedRegistry<V> {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    pub(crate) fn add(&mut self, name: &str, value: V) -> Result<(), RegistrationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistrationError::EmptyName(self.kind));
        }
        if self.entries.contains_key(name) {
            return Err(RegistrationError::Duplicate {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        info!("registered {} [{}]", self.kind, name);
        self.entries.insert(name.to_string(), value);
        Ok(())
    }

    pub(crate) fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
