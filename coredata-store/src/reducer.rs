//! Folds actions into the state tree.

use crate::Action;
use crate::state::{CoreState, EntityBucket, UsersState};
use coredata_model::{EmbedPreview, EntityConfig, EntityRecord, Term, ThemeSupports, User};
use std::sync::Arc;
use tracing::{debug, warn};

/// Pure reducer over [`CoreState`].
///
/// Knows the configured entities so it can build their default buckets and
/// find each entity's key field.
#[derive(Debug, Clone)]
pub struct CoreReducer {
    entities: Vec<EntityConfig>,
}

impl CoreReducer {
    pub fn new(entities: Vec<EntityConfig>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[EntityConfig] {
        &self.entities
    }

    /// The tree before any action: empty maps, one empty bucket per entity.
    pub fn initial_state(&self) -> CoreState {
        CoreState::for_entities(&self.entities)
    }

    /// Returns the state after applying `action`.
    ///
    /// Subtrees the action does not touch are shared with `state`.
    pub fn reduce(&self, state: &CoreState, action: &Action) -> CoreState {
        debug!(action = action.kind(), "reducing action");
        match action {
            Action::ReceiveTerms { taxonomy, terms } => receive_terms(state, taxonomy, terms),
            Action::ReceiveUserQuery { query_id, users } => {
                receive_user_query(state, query_id, users)
            }
            Action::ReceiveEntityRecords {
                kind,
                name,
                records,
            } => self.receive_entity_records(state, kind, name, records),
            Action::ReceiveThemeSupports { theme_supports } => {
                receive_theme_supports(state, theme_supports)
            }
            Action::ReceiveEmbedPreview { url, preview } => {
                receive_embed_preview(state, url, preview)
            }
        }
    }

    fn receive_entity_records(
        &self,
        state: &CoreState,
        kind: &str,
        name: &str,
        records: &[EntityRecord],
    ) -> CoreState {
        let Some(config) = self.entities.iter().find(|c| c.matches(kind, name)) else {
            warn!(kind, name, "received records for an unconfigured entity, ignoring");
            return state.clone();
        };

        let mut by_key = state
            .entity_bucket(kind, name)
            .map(|bucket| (*bucket.by_key).clone())
            .unwrap_or_default();
        for record in records {
            match config.key_of(record) {
                Some(key) => {
                    by_key.insert(key, Arc::new(record.clone()));
                }
                None => warn!(
                    kind,
                    name,
                    key_field = %config.key,
                    "record has no usable key, skipping"
                ),
            }
        }
        debug!(kind, name, records = by_key.len(), "entity records merged");

        state.with_entity_bucket(
            kind,
            name,
            EntityBucket {
                by_key: Arc::new(by_key),
            },
        )
    }
}

impl Default for CoreReducer {
    fn default() -> Self {
        Self::new(coredata_model::default_entities())
    }
}

fn receive_terms(state: &CoreState, taxonomy: &str, terms: &[Term]) -> CoreState {
    let mut by_taxonomy = (*state.terms).clone();
    by_taxonomy.insert(taxonomy.to_string(), Arc::new(terms.to_vec()));
    CoreState {
        terms: Arc::new(by_taxonomy),
        ..state.clone()
    }
}

fn receive_user_query(state: &CoreState, query_id: &str, users: &[User]) -> CoreState {
    let mut by_id = (*state.users.by_id).clone();
    for user in users {
        by_id.insert(user.id, Arc::new(user.clone()));
    }

    let mut queries = (*state.users.queries).clone();
    queries.insert(
        query_id.to_string(),
        Arc::new(users.iter().map(|u| u.id).collect()),
    );

    CoreState {
        users: UsersState {
            by_id: Arc::new(by_id),
            queries: Arc::new(queries),
        },
        ..state.clone()
    }
}

fn receive_theme_supports(state: &CoreState, theme_supports: &ThemeSupports) -> CoreState {
    CoreState {
        theme_supports: Arc::new(state.theme_supports.merged(theme_supports)),
        ..state.clone()
    }
}

fn receive_embed_preview(state: &CoreState, url: &str, preview: &EmbedPreview) -> CoreState {
    let mut previews = (*state.embed_previews).clone();
    previews.insert(url.to_string(), Arc::new(preview.clone()));
    CoreState {
        embed_previews: Arc::new(previews),
        ..state.clone()
    }
}
