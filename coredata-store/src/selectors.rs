//! Read accessors over [`CoreState`].
//!
//! Plain lookups are free functions. The two derived lists
//! (`get_user_query_results`, `get_entity_records`) and the resolution
//! checks need per-store context, so they live on [`CoreSelectors`], which
//! re-exposes the plain lookups too.

use crate::error::{StoreError, StoreResult};
use crate::memo::MemoSelector;
use crate::resolution::ResolutionTracker;
use crate::state::{CoreState, RecordMap, TermList};
use crate::{AUTHORS_QUERY, CATEGORIES_TAXONOMY};
use coredata_model::{EmbedPreview, EntityRecord, ThemeSupports, User};
use coredata_types::{EntityRef, RecordKey, UserId};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of looking up an embed preview.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewLookup {
    /// No preview was ever received for the URL.
    Unfetched,
    /// The provider only produced a bare link; the URL cannot be embedded.
    NotEmbeddable,
    /// A preview with embeddable content.
    Embeddable(Arc<EmbedPreview>),
}

impl PreviewLookup {
    pub fn is_fetched(&self) -> bool {
        !matches!(self, Self::Unfetched)
    }

    pub fn preview(&self) -> Option<&Arc<EmbedPreview>> {
        match self {
            Self::Embeddable(preview) => Some(preview),
            _ => None,
        }
    }
}

/// Terms of `taxonomy`, or `None` if they were never received.
pub fn get_terms<'a>(state: &'a CoreState, taxonomy: &str) -> Option<&'a TermList> {
    state.terms.get(taxonomy)
}

pub fn get_categories(state: &CoreState) -> Option<&TermList> {
    get_terms(state, CATEGORIES_TAXONOMY)
}

/// A single record of the (kind, name) entity.
///
/// `Ok(None)` if the key is not cached; `Err` if the entity has no bucket.
pub fn get_entity_record(
    state: &CoreState,
    kind: &str,
    name: &str,
    key: &RecordKey,
) -> StoreResult<Option<Arc<EntityRecord>>> {
    let bucket = state
        .entity_bucket(kind, name)
        .ok_or_else(|| StoreError::unknown_entity(kind, name))?;
    Ok(bucket.get(key).cloned())
}

pub fn get_theme_supports(state: &CoreState) -> &Arc<ThemeSupports> {
    &state.theme_supports
}

/// The embed preview for `url`.
///
/// A stored `null` reads as never fetched; `false`, `0` and `""` read as
/// not embeddable.
pub fn get_preview(state: &CoreState, url: &str) -> PreviewLookup {
    match state.embed_previews.get(url) {
        None => PreviewLookup::Unfetched,
        Some(preview) if preview.is_null() => PreviewLookup::Unfetched,
        Some(preview) if preview.is_falsy() => PreviewLookup::NotEmbeddable,
        Some(preview) if preview.is_bare_link_to(url) => PreviewLookup::NotEmbeddable,
        Some(preview) => PreviewLookup::Embeddable(Arc::clone(preview)),
    }
}

type UserQueryDeps = (
    Option<Arc<Vec<UserId>>>,
    Arc<HashMap<UserId, Arc<User>>>,
);

/// Accessors bound to one store: its key, its resolution tracker and the
/// memo caches of the derived lists.
pub struct CoreSelectors {
    store_key: String,
    tracker: Arc<dyn ResolutionTracker>,
    user_query_results: MemoSelector<String, UserQueryDeps, Vec<Arc<User>>>,
    entity_records: MemoSelector<EntityRef, RecordMap, Vec<Arc<EntityRecord>>>,
}

impl CoreSelectors {
    pub fn new(store_key: &str, tracker: Arc<dyn ResolutionTracker>) -> Self {
        Self {
            store_key: store_key.to_string(),
            tracker,
            user_query_results: MemoSelector::new("getUserQueryResults"),
            entity_records: MemoSelector::new("getEntityRecords"),
        }
    }

    pub fn store_key(&self) -> &str {
        &self.store_key
    }

    fn is_resolving(&self, selector: &str, args: &[Value]) -> bool {
        self.tracker.is_in_progress(&self.store_key, selector, args)
    }

    pub fn get_terms<'a>(&self, state: &'a CoreState, taxonomy: &str) -> Option<&'a TermList> {
        get_terms(state, taxonomy)
    }

    pub fn get_categories<'a>(&self, state: &'a CoreState) -> Option<&'a TermList> {
        get_categories(state)
    }

    /// Whether terms of `taxonomy` are being fetched. Ignores cached content.
    pub fn is_requesting_terms(&self, _state: &CoreState, taxonomy: &str) -> bool {
        self.is_resolving("getTerms", &[json!(taxonomy)])
    }

    /// Whether categories are being fetched. Ignores cached content.
    pub fn is_requesting_categories(&self) -> bool {
        self.is_resolving("getCategories", &[])
    }

    pub fn get_authors(&self, state: &CoreState) -> Arc<Vec<Arc<User>>> {
        self.get_user_query_results(state, AUTHORS_QUERY)
    }

    /// Users returned by `query_id`, in query order.
    ///
    /// Recomputed only when the query's id list or the `byId` map is
    /// replaced. An unknown query yields an empty list; ids with no user
    /// record are skipped.
    pub fn get_user_query_results(&self, state: &CoreState, query_id: &str) -> Arc<Vec<Arc<User>>> {
        let ids = state.users.query(query_id).cloned();
        let by_id = Arc::clone(&state.users.by_id);
        let deps = (ids.clone(), Arc::clone(&by_id));

        self.user_query_results
            .get_or_compute(query_id.to_string(), deps, || {
                ids.iter()
                    .flat_map(|ids| ids.iter())
                    .filter_map(|id| by_id.get(id).cloned())
                    .collect()
            })
    }

    pub fn get_entity_record(
        &self,
        state: &CoreState,
        kind: &str,
        name: &str,
        key: &RecordKey,
    ) -> StoreResult<Option<Arc<EntityRecord>>> {
        get_entity_record(state, kind, name, key)
    }

    /// All records of the (kind, name) entity, in key order.
    ///
    /// Recomputed only when that entity's `byKey` map is replaced.
    pub fn get_entity_records(
        &self,
        state: &CoreState,
        kind: &str,
        name: &str,
    ) -> StoreResult<Arc<Vec<Arc<EntityRecord>>>> {
        let bucket = state
            .entity_bucket(kind, name)
            .ok_or_else(|| StoreError::unknown_entity(kind, name))?;
        let by_key = Arc::clone(&bucket.by_key);

        Ok(self.entity_records.get_or_compute(
            EntityRef::new(kind, name),
            Arc::clone(&by_key),
            || by_key.values().cloned().collect(),
        ))
    }

    pub fn get_theme_supports<'a>(&self, state: &'a CoreState) -> &'a Arc<ThemeSupports> {
        get_theme_supports(state)
    }

    pub fn get_preview(&self, state: &CoreState, url: &str) -> PreviewLookup {
        get_preview(state, url)
    }

    /// Drops the memoized lists, releasing every cached result.
    pub fn clear_cache(&self) {
        self.user_query_results.clear();
        self.entity_records.clear();
    }
}

impl std::fmt::Debug for CoreSelectors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreSelectors")
            .field("store_key", &self.store_key)
            .field("user_query_results", &self.user_query_results)
            .field("entity_records", &self.entity_records)
            .finish_non_exhaustive()
    }
}
