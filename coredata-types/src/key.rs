//! Natural keys of entity records.
//!
//! Entities are keyed by whatever field their configuration names: post
//! types use their `slug`, media items their numeric `id`. A key is read
//! out of the record's JSON payload with [`RecordKey::from_value`].
//!
//! Keys are equal when their text forms are equal, so `5`, `5.0` and `"5"`
//! all address the same record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The key of a record inside an entity's `byKey` map.
///
/// Build keys with the `From` impls or [`RecordKey::from_value`]; they map
/// decimal text onto [`RecordKey::Id`]. Equality, ordering and hashing go
/// through the text form either way, so `Slug("5")` still equals `Id(5)`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RecordKey {
    /// Numeric key (e.g. a media item's `id`).
    Id(u64),
    /// String key (e.g. a post type's `slug`).
    Slug(String),
}

/// Comparison form of a key.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Canonical<'a> {
    Number(u64),
    Text(&'a str),
}

/// Parses `s` as a number only if that number prints back as `s`.
fn canonical_number(s: &str) -> Option<u64> {
    let digits_only = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    s.parse().ok()
}

impl RecordKey {
    /// Extracts a key from a JSON value.
    ///
    /// Strings, numbers and booleans are keyed by their text form (`-1`,
    /// `1.5`, `true`); integral numbers and decimal strings become
    /// [`RecordKey::Id`]. Null, arrays and objects have no key.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::from(s.as_str())),
            Value::Number(n) => {
                if let Some(id) = n.as_u64() {
                    Some(Self::Id(id))
                } else if let Some(i) = n.as_i64() {
                    Some(Self::Slug(i.to_string()))
                } else {
                    n.as_f64().map(|f| Self::from(f.to_string()))
                }
            }
            Value::Bool(b) => Some(Self::Slug(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Like [`RecordKey::from_value`], but reports why the value was rejected.
    pub fn try_from_value(value: &Value) -> crate::Result<Self> {
        Self::from_value(value).ok_or_else(|| crate::Error::InvalidRecordKey(value.to_string()))
    }

    /// Returns the slug if this is a non-numeric string key.
    #[must_use]
    pub fn as_slug(&self) -> Option<&str> {
        match self.canonical() {
            Canonical::Text(s) => Some(s),
            Canonical::Number(_) => None,
        }
    }

    /// Returns the numeric id if the key is a non-negative integer.
    #[must_use]
    pub fn as_id(&self) -> Option<u64> {
        match self.canonical() {
            Canonical::Number(id) => Some(id),
            Canonical::Text(_) => None,
        }
    }

    fn canonical(&self) -> Canonical<'_> {
        match self {
            Self::Id(id) => Canonical::Number(*id),
            Self::Slug(s) => match canonical_number(s) {
                Some(id) => Canonical::Number(id),
                None => Canonical::Text(s),
            },
        }
    }
}

impl PartialEq for RecordKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for RecordKey {}

impl PartialOrd for RecordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical().cmp(&other.canonical())
    }
}

impl Hash for RecordKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid record key: {value}")))
    }
}

impl From<u64> for RecordKey {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RecordKey {
    fn from(slug: &str) -> Self {
        match canonical_number(slug) {
            Some(id) => Self::Id(id),
            None => Self::Slug(slug.to_string()),
        }
    }
}

impl From<String> for RecordKey {
    fn from(slug: String) -> Self {
        match canonical_number(&slug) {
            Some(id) => Self::Id(id),
            None => Self::Slug(slug),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}
