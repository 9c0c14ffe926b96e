//! Cached record model for coredata.
//!
//! Defines the payload types held by the cache:
//! - [`Term`] — a taxonomy term (category, tag, ...)
//! - [`User`] — a user record, addressed by [`coredata_types::UserId`]
//! - [`EntityRecord`] — an arbitrary JSON record of a configured entity
//! - [`EmbedPreview`] — an oEmbed-style preview payload for a URL
//! - [`ThemeSupports`] — the flat record of theme capability flags
//! - [`EntityConfig`] — declares an entity's kind, name and key field
//!
//! Everything here is plain data. The state tree, reducer and selectors
//! that index these records live in `coredata-store`.

mod config;
mod embed;
mod record;
mod term;
mod theme;
mod user;

pub use config::{DEFAULT_KEY_FIELD, EntityConfig, default_entities};
pub use embed::EmbedPreview;
pub use record::EntityRecord;
pub use term::Term;
pub use theme::ThemeSupports;
pub use user::User;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when model data does not satisfy its constraints.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Entity configuration is missing a required field.
    #[error("invalid entity config: {0}")]
    InvalidEntityConfig(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
