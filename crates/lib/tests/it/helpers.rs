//! Shared helpers for the integration tests.

use duomodel::{Key, Model, ModelKind, Value};

/// The document used throughout the round-trip tests
pub const SAMPLE_JSON: &str =
    r#"{"key1":"value1","key2":2,"key3":["one","two","three"],"key4":{"k1":"v1","k2":"v2"}}"#;

/// Create a Hash Model populated with the given pairs, in order
pub fn setup_hash(pairs: &[(&str, i64)]) -> Model {
    let model = Model::new(ModelKind::Hash);
    for (key, value) in pairs {
        model.set(*key, *value).expect("Failed to set hash entry");
    }
    model
}

/// Create a List Model populated with the given text values, in order
pub fn setup_list(items: &[&str]) -> Model {
    let model = Model::new(ModelKind::List);
    for item in items {
        model.push(*item).expect("Failed to push list element");
    }
    model
}

/// Assert that the Hash indexes are exact inverses sized like the store
pub fn assert_indexes_consistent(model: &Model) {
    let data = model.data();
    match data.kind {
        ModelKind::Hash => {
            assert_eq!(data.key_to_pos.len(), data.store.len(), "key_to_pos size");
            assert_eq!(data.pos_to_key.len(), data.store.len(), "pos_to_key size");
            for (key, pos) in &data.key_to_pos {
                assert_eq!(
                    data.pos_to_key.get(pos),
                    Some(key),
                    "pos_to_key[{pos}] should be '{key}'"
                );
            }
        }
        ModelKind::List => {
            assert!(data.key_to_pos.is_empty(), "list models keep no key index");
            assert!(data.pos_to_key.is_empty(), "list models keep no position index");
        }
    }
}

/// Drain the shared cursor from a fresh reset, rendering keys as text
pub fn drain_shared(model: &Model) -> Vec<(String, Value)> {
    model.reset();
    let mut out = Vec::new();
    while let Some((key, value)) = model.next() {
        out.push((key.to_string(), value));
    }
    out
}

/// Render a Model's keys as text
pub fn key_names(model: &Model) -> Vec<String> {
    model.keys().iter().map(Key::to_string).collect()
}
