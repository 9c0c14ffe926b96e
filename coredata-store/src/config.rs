//! Store configuration (`coredata.toml`).
//!
//! ```toml
//! store_key = "core"
//!
//! [[entity]]
//! kind = "root"
//! name = "postType"
//! key = "slug"
//! base_url = "/wp/v2/types"
//! ```
//!
//! Omitting `[[entity]]` tables entirely selects the default entities.

use crate::error::{StoreError, StoreResult};
use coredata_model::{EntityConfig, default_entities};
use coredata_types::STORE_KEY;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_store_key() -> String {
    STORE_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the store is registered under; resolution lookups use it.
    #[serde(default = "default_store_key")]
    pub store_key: String,
    /// Entities that get a bucket in the state tree.
    #[serde(default = "default_entities", rename = "entity")]
    pub entities: Vec<EntityConfig>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_key: default_store_key(),
            entities: default_entities(),
        }
    }
}

impl StoreConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> StoreResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.store_key.trim().is_empty() {
            return Err(StoreError::Config("store_key is required".into()));
        }
        let mut seen = HashSet::new();
        for entity in &self.entities {
            entity.validate()?;
            if !seen.insert(entity.entity_ref()) {
                return Err(StoreError::Config(format!(
                    "entity {} declared more than once",
                    entity.entity_ref()
                )));
            }
        }
        Ok(())
    }
}
