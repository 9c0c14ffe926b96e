use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Theme capability flags, e.g. `{"post-thumbnails": true, "wide-images": false}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeSupports {
    flags: Map<String, Value>,
}

impl ThemeSupports {
    pub fn new(flags: Map<String, Value>) -> Self {
        Self { flags }
    }

    /// Raw value of a flag.
    pub fn get(&self, flag: &str) -> Option<&Value> {
        self.flags.get(flag)
    }

    /// Whether the theme declares support for `flag`.
    ///
    /// Follows the truthiness of the REST payload: `false`, `null`, `0` and
    /// `""` mean unsupported; arrays and objects (e.g. a list of post types
    /// for `post-thumbnails`) mean supported.
    pub fn supports(&self, flag: &str) -> bool {
        match self.flags.get(flag) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => true,
        }
    }

    pub fn flags(&self) -> &Map<String, Value> {
        &self.flags
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Shallow merge: flags in `other` overwrite flags in `self`.
    #[must_use]
    pub fn merged(&self, other: &ThemeSupports) -> ThemeSupports {
        let mut flags = self.flags.clone();
        for (k, v) in &other.flags {
            flags.insert(k.clone(), v.clone());
        }
        ThemeSupports { flags }
    }
}
