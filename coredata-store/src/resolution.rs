//! In-flight status of selector-triggered fetches.
//!
//! The cache itself never fetches. Whatever drives fetching records, per
//! (store key, selector name, arguments), when a resolution starts and when
//! it finishes; the `isRequesting*` accessors only ask whether one is
//! currently running.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Answers whether a resolution is in progress.
///
/// Injected into [`CoreSelectors`](crate::CoreSelectors) so the accessors
/// do not depend on a process-wide registry.
pub trait ResolutionTracker: Send + Sync {
    /// True if the resolution for `selector` called with `args` on the store
    /// `store_key` has started and not yet finished.
    fn is_in_progress(&self, store_key: &str, selector: &str, args: &[Value]) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolutionStatus {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResolutionKey {
    store_key: String,
    selector: String,
    /// Arguments as canonical JSON, so equal argument lists share a key.
    args: String,
}

impl ResolutionKey {
    fn new(store_key: &str, selector: &str, args: &[Value]) -> Self {
        Self {
            store_key: store_key.to_string(),
            selector: selector.to_string(),
            args: Value::Array(args.to_vec()).to_string(),
        }
    }
}

/// In-memory [`ResolutionTracker`] that records start/finish transitions.
#[derive(Debug, Default)]
pub struct ResolutionRegistry {
    statuses: RwLock<HashMap<ResolutionKey, ResolutionStatus>>,
}

impl ResolutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a resolution as started.
    pub fn start_resolution(&self, store_key: &str, selector: &str, args: &[Value]) {
        debug!(store_key, selector, "resolution started");
        self.set(store_key, selector, args, ResolutionStatus::InProgress);
    }

    /// Marks a resolution as finished.
    pub fn finish_resolution(&self, store_key: &str, selector: &str, args: &[Value]) {
        debug!(store_key, selector, "resolution finished");
        self.set(store_key, selector, args, ResolutionStatus::Finished);
    }

    /// True once the resolution has been started, whether or not it finished.
    pub fn has_started_resolution(&self, store_key: &str, selector: &str, args: &[Value]) -> bool {
        self.status(store_key, selector, args).is_some()
    }

    pub fn has_finished_resolution(&self, store_key: &str, selector: &str, args: &[Value]) -> bool {
        self.status(store_key, selector, args) == Some(ResolutionStatus::Finished)
    }

    /// Forgets every recorded resolution.
    pub fn clear(&self) {
        self.statuses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn set(&self, store_key: &str, selector: &str, args: &[Value], status: ResolutionStatus) {
        self.statuses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ResolutionKey::new(store_key, selector, args), status);
    }

    fn status(&self, store_key: &str, selector: &str, args: &[Value]) -> Option<ResolutionStatus> {
        self.statuses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ResolutionKey::new(store_key, selector, args))
            .copied()
    }
}

impl ResolutionTracker for ResolutionRegistry {
    fn is_in_progress(&self, store_key: &str, selector: &str, args: &[Value]) -> bool {
        self.status(store_key, selector, args) == Some(ResolutionStatus::InProgress)
    }
}
