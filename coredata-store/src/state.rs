//! The cached state tree.
//!
//! Every subtree sits behind an `Arc`. The reducer never mutates a subtree
//! in place: it builds a replacement for each subtree on the path to a
//! change and shares the rest, so `Arc::ptr_eq` on a subtree answers
//! "has this changed?".

use coredata_model::{EmbedPreview, EntityConfig, EntityRecord, Term, ThemeSupports, User};
use coredata_types::{RecordKey, UserId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Ordered list of terms for one taxonomy.
pub type TermList = Arc<Vec<Term>>;

/// Records of one entity, by natural key.
pub type RecordMap = Arc<BTreeMap<RecordKey, Arc<EntityRecord>>>;

/// Records of one (kind, name) entity.
#[derive(Debug, Clone, Default)]
pub struct EntityBucket {
    pub by_key: RecordMap,
}

impl EntityBucket {
    pub fn get(&self, key: &RecordKey) -> Option<&Arc<EntityRecord>> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Users by id plus the id lists returned by each user query.
#[derive(Debug, Clone, Default)]
pub struct UsersState {
    pub by_id: Arc<HashMap<UserId, Arc<User>>>,
    pub queries: Arc<HashMap<String, Arc<Vec<UserId>>>>,
}

impl UsersState {
    /// The id list stored for `query_id`, if that query was ever received.
    pub fn query(&self, query_id: &str) -> Option<&Arc<Vec<UserId>>> {
        self.queries.get(query_id)
    }
}

/// Root of the cache.
#[derive(Debug, Clone, Default)]
pub struct CoreState {
    /// Taxonomy name → terms, replaced wholesale per taxonomy.
    pub terms: Arc<HashMap<String, TermList>>,
    pub users: UsersState,
    /// kind → name → bucket.
    pub entities: Arc<HashMap<String, Arc<HashMap<String, EntityBucket>>>>,
    pub theme_supports: Arc<ThemeSupports>,
    /// URL → preview; absent means never fetched.
    pub embed_previews: Arc<HashMap<String, Arc<EmbedPreview>>>,
}

impl CoreState {
    /// An empty tree with an empty bucket for every configured entity.
    pub fn for_entities(entities: &[EntityConfig]) -> Self {
        let mut kinds: HashMap<String, HashMap<String, EntityBucket>> = HashMap::new();
        for config in entities {
            kinds
                .entry(config.kind.clone())
                .or_default()
                .entry(config.name.clone())
                .or_default();
        }
        Self {
            entities: Arc::new(
                kinds
                    .into_iter()
                    .map(|(kind, names)| (kind, Arc::new(names)))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// The bucket for (kind, name), if that entity has one.
    pub fn entity_bucket(&self, kind: &str, name: &str) -> Option<&EntityBucket> {
        self.entities.get(kind).and_then(|names| names.get(name))
    }

    /// Returns a copy of this tree with the bucket for (kind, name) replaced.
    ///
    /// The kind map and the top-level entity map are rebuilt; sibling
    /// buckets and every other subtree keep their identity.
    pub(crate) fn with_entity_bucket(&self, kind: &str, name: &str, bucket: EntityBucket) -> Self {
        let mut names = self
            .entities
            .get(kind)
            .map(|names| (**names).clone())
            .unwrap_or_default();
        names.insert(name.to_string(), bucket);

        let mut kinds = (*self.entities).clone();
        kinds.insert(kind.to_string(), Arc::new(names));

        Self {
            entities: Arc::new(kinds),
            ..self.clone()
        }
    }
}
