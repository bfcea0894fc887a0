/*!
 * In-memory record with raw attribute storage.
 *
 * A `Record` holds the raw column values of one row, in column order, plus a
 * snapshot of the values as they were when loaded. Persisting the attributes
 * back to storage is the caller's responsibility.
 */

use serde_json::{Map, Value};

/// Default primary key attribute
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Raw attribute store of a single persisted entity
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Name of the identity attribute
    primary_key: String,
    /// Current raw values
    attributes: Map<String, Value>,
    /// Raw values as loaded, before any mutation
    original: Map<String, Value>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    /// Create an empty, unsaved record keyed by `id`
    pub fn new() -> Self {
        Self {
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            attributes: Map::new(),
            original: Map::new(),
        }
    }

    /// Create a record from loaded values; they become the original snapshot too
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            original: attributes.clone(),
            attributes,
        }
    }

    /// Use a different identity attribute
    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Identity value, if the record has one
    pub fn identity(&self) -> Option<&Value> {
        self.attributes.get(&self.primary_key).filter(|v| !v.is_null())
    }

    /// Current raw value of an attribute
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Raw value of an attribute as it was when loaded
    pub fn original(&self, key: &str) -> Option<&Value> {
        self.original.get(key)
    }

    /// Replace the raw value of an attribute
    pub fn set_raw(&mut self, key: &str, value: Value) -> &mut Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// All current raw values, in column order
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Attributes whose raw value differs from the original snapshot
    pub fn dirty(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .filter(|(key, value)| self.original.get(*key) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn is_dirty(&self, key: &str) -> bool {
        self.attributes.get(key) != self.original.get(key)
    }

    /// Mark the current values as persisted
    pub fn sync_original(&mut self) -> &mut Self {
        self.original = self.attributes.clone();
        self
    }
}
