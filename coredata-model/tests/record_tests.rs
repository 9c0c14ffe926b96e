use coredata_model::{EmbedPreview, EntityRecord, Term, ThemeSupports, User};
use coredata_types::{RecordKey, UserId};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Term ─────────────────────────────────────────────────────────

#[test]
fn term_deserializes_with_extra_fields() {
    let term: Term =
        serde_json::from_value(json!({"id": 3, "name": "News", "slug": "news", "parent": 0}))
            .unwrap();
    assert_eq!(term.id, 3);
    assert_eq!(term.name(), Some("News"));
    assert_eq!(term.slug(), Some("news"));
    assert_eq!(term.parent(), None);
}

#[test]
fn term_bare_id_roundtrips() {
    let term: Term = serde_json::from_value(json!({"id": 1})).unwrap();
    assert_eq!(term, Term::new(1));
    assert_eq!(serde_json::to_value(&term).unwrap(), json!({"id": 1}));
}

#[test]
fn term_parent_reports_nonzero_parent() {
    let term = Term::new(5).with_field("parent", 2);
    assert_eq!(term.parent(), Some(2));
}

// ── User ─────────────────────────────────────────────────────────

#[test]
fn user_deserializes_id_and_name() {
    let user: User =
        serde_json::from_value(json!({"id": 7, "name": "Ada", "slug": "ada"})).unwrap();
    assert_eq!(user.id, UserId::new(7));
    assert_eq!(user.name, "Ada");
    assert_eq!(user.get_str("slug"), Some("ada"));
}

#[test]
fn user_name_defaults_to_empty() {
    let user: User = serde_json::from_value(json!({"id": 1})).unwrap();
    assert_eq!(user.name, "");
}

// ── EntityRecord ─────────────────────────────────────────────────

#[test]
fn entity_record_reads_slug_key() {
    let record = EntityRecord::new(json!({"slug": "post", "name": "Posts"}));
    assert_eq!(record.key("slug"), Some(RecordKey::from("post")));
    assert_eq!(record.key("id"), None);
}

#[test]
fn entity_record_reads_numeric_key() {
    let record = EntityRecord::from(json!({"id": 10}));
    assert_eq!(record.key("id"), Some(RecordKey::Id(10)));
}

#[test]
fn entity_record_pointer_helpers() {
    let record = EntityRecord::new(json!({
        "title": {"rendered": "Beach"},
        "hierarchical": false,
        "width": 640
    }));
    assert_eq!(record.get_str("/title/rendered"), Some("Beach"));
    assert_eq!(record.get_bool("/hierarchical"), Some(false));
    assert_eq!(record.get_number("/width"), Some(640.0));
    assert_eq!(record.get_str("/missing"), None);
}

#[test]
fn entity_record_serializes_transparently() {
    let record = EntityRecord::new(json!({"slug": "b", "title": "beach"}));
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"slug": "b", "title": "beach"})
    );
}

// ── EmbedPreview ─────────────────────────────────────────────────

#[test]
fn embed_preview_detects_bare_link() {
    let preview = EmbedPreview::new(json!({
        "html": "<a href=\"http://example.com/\">http://example.com/</a>"
    }));
    assert!(preview.is_bare_link_to("http://example.com/"));
    assert!(!preview.is_bare_link_to("http://example.org/"));
}

#[test]
fn embed_preview_without_html_is_not_bare_link() {
    let preview = EmbedPreview::new(json!({"data": 42}));
    assert_eq!(preview.html(), None);
    assert!(!preview.is_bare_link_to("http://example.com/"));
}

#[test]
fn embed_preview_with_rich_html_is_not_bare_link() {
    let preview = EmbedPreview::new(json!({
        "html": "<blockquote class=\"twitter-tweet\"><a href=\"http://example.com/\">x</a></blockquote>"
    }));
    assert!(!preview.is_bare_link_to("http://example.com/"));
}

// ── ThemeSupports ────────────────────────────────────────────────

#[test]
fn theme_supports_truthiness() {
    let supports: ThemeSupports = serde_json::from_value(json!({
        "post-thumbnails": ["post", "page"],
        "wide-images": true,
        "formats": [],
        "custom-logo": false,
        "editor-color-palette": null,
        "align": 0,
        "label": ""
    }))
    .unwrap();
    assert!(supports.supports("post-thumbnails"));
    assert!(supports.supports("wide-images"));
    assert!(supports.supports("formats"));
    assert!(!supports.supports("custom-logo"));
    assert!(!supports.supports("editor-color-palette"));
    assert!(!supports.supports("align"));
    assert!(!supports.supports("label"));
    assert!(!supports.supports("unknown"));
}

#[test]
fn theme_supports_merge_overwrites_shared_flags() {
    let base: ThemeSupports =
        serde_json::from_value(json!({"wide-images": false, "formats": ["aside"]})).unwrap();
    let update: ThemeSupports = serde_json::from_value(json!({"wide-images": true})).unwrap();
    let merged = base.merged(&update);
    assert_eq!(
        serde_json::to_value(&merged).unwrap(),
        json!({"wide-images": true, "formats": ["aside"]})
    );
    // inputs untouched
    assert!(!base.supports("wide-images"));
}

#[test]
fn theme_supports_default_is_empty() {
    assert!(ThemeSupports::default().is_empty());
}
