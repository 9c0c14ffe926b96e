use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An oEmbed-style preview payload for a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbedPreview {
    payload: Value,
}

impl EmbedPreview {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The `html` field of the payload, if it is a string.
    pub fn html(&self) -> Option<&str> {
        self.payload.get("html").and_then(|v| v.as_str())
    }

    /// A `null` payload carries no preview at all.
    pub fn is_null(&self) -> bool {
        self.payload.is_null()
    }

    /// `null`, `false`, `0` and `""`: payloads that stand for "no preview".
    pub fn is_falsy(&self) -> bool {
        match &self.payload {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(_) | Value::Object(_) => false,
        }
    }

    /// True when the preview's html is nothing but a bare link to `url`.
    ///
    /// oEmbed providers that cannot embed a URL fall back to
    /// `<a href="URL">URL</a>`; such a preview has no embeddable content.
    pub fn is_bare_link_to(&self, url: &str) -> bool {
        self.html() == Some(bare_link(url).as_str())
    }
}

impl From<Value> for EmbedPreview {
    fn from(payload: Value) -> Self {
        Self::new(payload)
    }
}

fn bare_link(url: &str) -> String {
    format!(r#"<a href="{url}">{url}</a>"#)
}
