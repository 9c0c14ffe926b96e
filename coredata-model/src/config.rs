//! Entity declarations.
//!
//! Each configured entity gets an (initially empty) bucket in the state
//! tree, and its `key` names the record field used as the `byKey` index.

use crate::{EntityRecord, ModelError, ModelResult};
use coredata_types::{EntityRef, RecordKey};
use serde::{Deserialize, Serialize};

/// Key field used when an entity does not declare one.
pub const DEFAULT_KEY_FIELD: &str = "id";

fn default_key() -> String {
    DEFAULT_KEY_FIELD.to_string()
}

/// Declares one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub kind: String,
    pub name: String,
    /// Record field holding the natural key.
    #[serde(default = "default_key")]
    pub key: String,
    /// REST route the records are fetched from.
    #[serde(default)]
    pub base_url: String,
    /// Plural name used for the generated list accessors (e.g. "mediaItems").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

impl EntityConfig {
    pub fn new(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            key: default_key(),
            base_url: String::new(),
            plural: None,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_plural(mut self, plural: &str) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.kind.clone(), self.name.clone())
    }

    pub fn matches(&self, kind: &str, name: &str) -> bool {
        self.kind == kind && self.name == name
    }

    /// Reads a record's key according to this entity's key field.
    pub fn key_of(&self, record: &EntityRecord) -> Option<RecordKey> {
        record.key(&self.key)
    }

    /// Checks required fields.
    pub fn validate(&self) -> ModelResult<()> {
        if self.kind.is_empty() {
            return Err(ModelError::InvalidEntityConfig("kind is required".into()));
        }
        if self.name.is_empty() {
            return Err(ModelError::InvalidEntityConfig(format!(
                "name is required (kind '{}')",
                self.kind
            )));
        }
        if self.key.is_empty() {
            return Err(ModelError::InvalidEntityConfig(format!(
                "key must not be empty for {}/{}",
                self.kind, self.name
            )));
        }
        Ok(())
    }
}

/// The entities every store knows about out of the box.
pub fn default_entities() -> Vec<EntityConfig> {
    vec![
        EntityConfig::new("root", "postType")
            .with_key("slug")
            .with_base_url("/wp/v2/types"),
        EntityConfig::new("root", "media")
            .with_base_url("/wp/v2/media")
            .with_plural("mediaItems"),
    ]
}
