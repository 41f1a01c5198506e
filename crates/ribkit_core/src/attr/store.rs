//! Defaulted key/value store reporting value transitions.

use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Attribute access errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrError {
    EmptyAttributeKey,
}

impl Display for AttrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAttributeKey => write!(f, "attribute key must not be empty"),
        }
    }
}

impl Error for AttrError {}

/// One observed value transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrChange {
    pub key: String,
    pub value: Value,
}

/// Per-instance attribute container with default-fallback seeding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrStore {
    defaults: BTreeMap<String, Value>,
    attributes: BTreeMap<String, Value>,
}

impl AttrStore {
    /// Creates a store seeded with `defaults`.
    pub fn new(defaults: BTreeMap<String, Value>) -> Self {
        let mut store = Self {
            defaults,
            attributes: BTreeMap::new(),
        };
        store.apply_defaults();
        store
    }

    /// Copies default values for keys not already set.
    pub fn apply_defaults(&mut self) {
        for (key, value) in &self.defaults {
            if !self.attributes.contains_key(key) {
                self.attributes.insert(key.clone(), value.clone());
            }
        }
    }

    /// Current value for `key`, or `None` when unset.
    ///
    /// Keys are trimmed the same way `set` trims them.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key.trim())
    }

    /// Live view of all current attributes.
    pub fn all(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Default values this store was seeded with.
    pub fn defaults(&self) -> &BTreeMap<String, Value> {
        &self.defaults
    }

    /// Stores `value` under `key`, reporting the transition when the value
    /// actually changed. An equal value leaves the store untouched and
    /// reports `None`.
    pub fn set(&mut self, key: &str, value: Value) -> Result<Option<AttrChange>, AttrError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AttrError::EmptyAttributeKey);
        }
        if self.attributes.get(key) == Some(&value) {
            return Ok(None);
        }
        self.attributes.insert(key.to_string(), value.clone());
        Ok(Some(AttrChange {
            key: key.to_string(),
            value,
        }))
    }
}
