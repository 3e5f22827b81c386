//! Registry - explicit, injected content lookup
//!
//! Replaces ambient global content caches: a registry is built once per
//! battle session and passed into the engine, so content can be swapped
//! in tests.

use super::{ContentError, ContentPack};
use crate::ability::Ability;
use crate::environment::EnvironmentDescriptor;
use crate::status::StatusRegistry;
use std::collections::HashMap;
use tracing::warn;

/// Id-keyed lookup of one kind of content definition
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: &'static str,
    entries: HashMap<String, T>,
}

impl<T> Registry<T> {
    pub fn new(kind: &'static str) -> Self {
        Registry {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Insert a definition; returns false when the id was already taken
    pub fn insert(&mut self, id: String, definition: T) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, definition);
        true
    }

    /// Look up a definition; a miss is warned about, never fatal
    pub fn get(&self, id: &str) -> Option<&T> {
        let entry = self.entries.get(id);
        if entry.is_none() {
            warn!(kind = self.kind, id, "unknown content id");
        }
        entry
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Every definition a battle session needs, loaded up front
#[derive(Debug, Clone)]
pub struct ContentSet {
    pub abilities: Registry<Ability>,
    pub statuses: StatusRegistry,
    pub environments: Registry<EnvironmentDescriptor>,
}

impl ContentSet {
    /// Empty content set (tests usually start here and insert pieces)
    pub fn empty() -> Self {
        ContentSet {
            abilities: Registry::new("ability"),
            statuses: StatusRegistry::new(),
            environments: Registry::new("environment"),
        }
    }

    /// Build from a parsed content pack, rejecting duplicate ids
    pub fn from_pack(pack: ContentPack) -> Result<Self, ContentError> {
        let mut set = ContentSet::empty();
        for ability in pack.abilities {
            let id = ability.id.clone();
            if !set.abilities.insert(id.clone(), ability) {
                return Err(ContentError::ValidationError(format!(
                    "duplicate ability id: {id}"
                )));
            }
        }
        for status in pack.statuses {
            set.statuses.insert(status);
        }
        for environment in pack.environments {
            let id = environment.id.clone();
            if !set.environments.insert(id.clone(), environment) {
                return Err(ContentError::ValidationError(format!(
                    "duplicate environment id: {id}"
                )));
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_insert_and_get() {
        let mut reg: Registry<i32> = Registry::new("number");
        assert!(reg.insert("one".to_string(), 1));
        assert!(!reg.insert("one".to_string(), 11));
        assert_eq!(reg.get("one"), Some(&1));
        assert_eq!(reg.get("two"), None);
        assert_eq!(reg.len(), 1);
    }
}
