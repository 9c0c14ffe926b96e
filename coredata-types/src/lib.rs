//! Core identifier types for coredata.
//!
//! This crate defines the small, copyable keys every other part of the
//! cache is indexed by:
//! - [`UserId`] — numeric user identifier (`users.byId` key)
//! - [`RecordKey`] — natural key of an entity record (numeric id or slug)
//! - [`EntityRef`] — the (kind, name) pair addressing an entity bucket
//!
//! Record payloads themselves live in `coredata-model`.

mod entity_ref;
mod ids;
mod key;

pub use entity_ref::EntityRef;
pub use ids::UserId;
pub use key::RecordKey;

/// Identifier of the core data store in the resolution registry.
pub const STORE_KEY: &str = "core";

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing identifiers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] std::num::ParseIntError),

    #[error("invalid record key: {0}")]
    InvalidRecordKey(String),

    #[error("invalid entity reference: {0}")]
    InvalidEntityRef(String),
}
