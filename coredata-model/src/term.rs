use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A taxonomy term as returned by the terms endpoint.
///
/// Only `id` is interpreted by the cache; every other field is kept
/// verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Term {
    /// Creates a term with no fields besides its id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Adds a field, builder style.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Term display name, if present.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(|v| v.as_str())
    }

    /// Term slug, if present.
    pub fn slug(&self) -> Option<&str> {
        self.fields.get("slug").and_then(|v| v.as_str())
    }

    /// Parent term id; `0` and absent both mean a top-level term.
    pub fn parent(&self) -> Option<u64> {
        self.fields
            .get("parent")
            .and_then(|v| v.as_u64())
            .filter(|p| *p != 0)
    }
}
