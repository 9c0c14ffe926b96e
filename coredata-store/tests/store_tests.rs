use coredata_model::{EmbedPreview, EntityRecord, Term, User};
use coredata_store::{Action, CoreStore, PreviewLookup, ResolutionRegistry, StoreConfig};
use coredata_types::{RecordKey, STORE_KEY};
use serde_json::json;
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[test]
fn new_store_starts_with_default_buckets() {
    init_tracing();
    let store = CoreStore::new(StoreConfig::default()).unwrap();
    assert!(store.state().entity_bucket("root", "postType").is_some());
    assert_eq!(store.selectors().store_key(), "core");
}

#[test]
fn invalid_config_is_rejected() {
    let config = StoreConfig {
        store_key: String::new(),
        ..StoreConfig::default()
    };
    assert!(CoreStore::new(config).is_err());
}

#[test]
fn dispatch_then_select() {
    init_tracing();
    let mut store = CoreStore::new(StoreConfig::default()).unwrap();
    store.dispatch(&Action::receive_terms("categories", vec![Term::new(1)]));
    store.dispatch(&Action::receive_user_query("authors", vec![User::new(4, "Dee")]));
    store.dispatch(&Action::receive_entity_records(
        "root",
        "postType",
        vec![EntityRecord::new(json!({"slug": "post", "name": "Posts"}))],
    ));
    store.dispatch(&Action::receive_embed_preview(
        "http://example.com/",
        EmbedPreview::new(json!({"html": "<iframe></iframe>"})),
    ));

    store.select(|s, state| {
        assert_eq!(s.get_categories(state).unwrap().len(), 1);
        assert_eq!(s.get_authors(state)[0].name, "Dee");
        let post = s
            .get_entity_record(state, "root", "postType", &RecordKey::from("post"))
            .unwrap()
            .unwrap();
        assert_eq!(post.get_str("/name"), Some("Posts"));
        assert!(matches!(
            s.get_preview(state, "http://example.com/"),
            PreviewLookup::Embeddable(_)
        ));
    });
}

#[test]
fn resolution_lifecycle_drives_is_requesting() {
    let store = CoreStore::new(StoreConfig::default()).unwrap();
    let selectors = store.selectors();
    assert!(!selectors.is_requesting_categories());

    store.resolution().start_resolution(STORE_KEY, "getCategories", &[]);
    assert!(selectors.is_requesting_categories());

    store.resolution().finish_resolution(STORE_KEY, "getCategories", &[]);
    assert!(!selectors.is_requesting_categories());
    assert!(store.resolution().has_finished_resolution(STORE_KEY, "getCategories", &[]));
}

#[test]
fn store_key_scopes_resolution_lookups() {
    let registry = Arc::new(ResolutionRegistry::new());
    let config = StoreConfig {
        store_key: "core/site".into(),
        ..StoreConfig::default()
    };
    let store = CoreStore::with_registry(config, registry.clone()).unwrap();

    registry.start_resolution(STORE_KEY, "getCategories", &[]);
    assert!(!store.selectors().is_requesting_categories());

    registry.start_resolution("core/site", "getCategories", &[]);
    assert!(store.selectors().is_requesting_categories());
}

#[test]
fn memoized_lists_survive_unrelated_dispatches() {
    let mut store = CoreStore::new(StoreConfig::default()).unwrap();
    store.dispatch(&Action::receive_user_query("authors", vec![User::new(1, "A")]));
    let before = store.select(|s, state| s.get_authors(state));

    store.dispatch(&Action::receive_terms("tags", vec![Term::new(3)]));
    let after = store.select(|s, state| s.get_authors(state));
    assert!(Arc::ptr_eq(&before, &after));
}
