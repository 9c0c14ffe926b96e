//! Error types for the store.

use coredata_model::ModelError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No bucket exists for the (kind, name) pair. Only configured entities
    /// have buckets, so this is a caller asking for an undeclared entity.
    #[error("unknown entity: {kind}/{name}")]
    UnknownEntity { kind: String, name: String },

    /// Configuration is structurally valid TOML but semantically wrong.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Model-level validation failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn unknown_entity(kind: &str, name: &str) -> Self {
        Self::UnknownEntity {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}
