//! Actions that feed fetched data into the cache.
//!
//! Serialized with a `type` tag so an action log reads like
//! `{"type": "RECEIVE_TERMS", "taxonomy": "categories", "terms": [...]}`.

use coredata_model::{EmbedPreview, EntityRecord, Term, ThemeSupports, User};
use serde::{Deserialize, Serialize};

/// A completed fetch, ready to be reduced into the state tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// All terms of a taxonomy.
    ReceiveTerms { taxonomy: String, terms: Vec<Term> },

    /// The users matched by a named query.
    ReceiveUserQuery {
        #[serde(rename = "queryID")]
        query_id: String,
        users: Vec<User>,
    },

    /// A batch of records of one entity.
    ReceiveEntityRecords {
        kind: String,
        name: String,
        records: Vec<EntityRecord>,
    },

    /// Theme capability flags.
    ReceiveThemeSupports {
        #[serde(rename = "themeSupports")]
        theme_supports: ThemeSupports,
    },

    /// The embed preview for a URL.
    ReceiveEmbedPreview { url: String, preview: EmbedPreview },
}

impl Action {
    pub fn receive_terms(taxonomy: &str, terms: Vec<Term>) -> Self {
        Self::ReceiveTerms {
            taxonomy: taxonomy.to_string(),
            terms,
        }
    }

    pub fn receive_user_query(query_id: &str, users: Vec<User>) -> Self {
        Self::ReceiveUserQuery {
            query_id: query_id.to_string(),
            users,
        }
    }

    pub fn receive_entity_records(kind: &str, name: &str, records: Vec<EntityRecord>) -> Self {
        Self::ReceiveEntityRecords {
            kind: kind.to_string(),
            name: name.to_string(),
            records,
        }
    }

    pub fn receive_theme_supports(theme_supports: ThemeSupports) -> Self {
        Self::ReceiveThemeSupports { theme_supports }
    }

    pub fn receive_embed_preview(url: &str, preview: EmbedPreview) -> Self {
        Self::ReceiveEmbedPreview {
            url: url.to_string(),
            preview,
        }
    }

    /// Parses an action from its JSON form.
    pub fn from_json(json: &str) -> crate::StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The action's `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReceiveTerms { .. } => "RECEIVE_TERMS",
            Self::ReceiveUserQuery { .. } => "RECEIVE_USER_QUERY",
            Self::ReceiveEntityRecords { .. } => "RECEIVE_ENTITY_RECORDS",
            Self::ReceiveThemeSupports { .. } => "RECEIVE_THEME_SUPPORTS",
            Self::ReceiveEmbedPreview { .. } => "RECEIVE_EMBED_PREVIEW",
        }
    }
}
