use coredata_types::RecordKey;
use serde::{Deserialize, Serialize};

/// A record of a configured entity (a post type, a media item, ...).
///
/// The cache does not know the record's structure; it only reads the key
/// field named by the entity's [`EntityConfig`](crate::EntityConfig).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord {
    data: serde_json::Value,
}

impl EntityRecord {
    pub fn new(data: serde_json::Value) -> Self {
        Self { data }
    }

    /// The raw JSON payload.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Reads the record's key from the top-level `field`.
    pub fn key(&self, field: &str) -> Option<RecordKey> {
        self.data.get(field).and_then(RecordKey::from_value)
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.data.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.data.pointer(pointer).and_then(|v| v.as_f64())
    }
}

impl From<serde_json::Value> for EntityRecord {
    fn from(data: serde_json::Value) -> Self {
        Self::new(data)
    }
}
