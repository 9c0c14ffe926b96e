//! Normalized client-side cache for coredata.
//!
//! The cache is an immutable state tree ([`CoreState`]) that only changes by
//! reducing an [`Action`] into a new tree. Unchanged subtrees are shared
//! between the old and new tree by `Arc`, which is what the memoized
//! selectors key on: a derived list is recomputed only when the `Arc` it was
//! computed from has been replaced.
//!
//! - [`CoreReducer`] — folds received data into the tree
//! - [`CoreSelectors`] — read accessors, two of them memoized
//! - [`ResolutionTracker`] — injected in-flight status of fetches
//! - [`CoreStore`] — owns a state, a reducer and the selectors
//! - [`StoreConfig`] — store key and entity declarations (TOML)

mod action;
mod config;
mod error;
mod memo;
mod reducer;
mod resolution;
mod selectors;
mod state;
mod store;

pub use action::Action;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memo::{Dependants, MemoSelector};
pub use reducer::CoreReducer;
pub use resolution::{ResolutionRegistry, ResolutionTracker};
pub use selectors::{CoreSelectors, PreviewLookup};
pub use state::{CoreState, EntityBucket, RecordMap, TermList, UsersState};
pub use store::CoreStore;

/// Taxonomy name the category accessors are bound to.
pub const CATEGORIES_TAXONOMY: &str = "categories";

/// User query id the author accessor is bound to.
pub const AUTHORS_QUERY: &str = "authors";
