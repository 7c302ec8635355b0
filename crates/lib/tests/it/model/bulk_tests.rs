//! Bulk operation tests
//!
//! Covers merge, reverse, filter, map_values and the snapshot accessors.

use duomodel::{ErrorKind, Key, ModelKind, Value};

use crate::helpers::*;

#[test]
fn test_merge_hash_overwrites_and_appends() {
    let target = setup_hash(&[("a", 1), ("b", 2)]);
    let source = setup_hash(&[("b", 20), ("c", 30)]);
    target.merge(&source).unwrap();

    assert_eq!(key_names(&target), vec!["a", "b", "c"]);
    assert_eq!(target.get("b").unwrap(), Value::from(20));
    assert_eq!(target.get("c").unwrap(), Value::from(30));
    assert_indexes_consistent(&target);

    // The source is unchanged
    assert_eq!(source.len(), 2);
}

#[test]
fn test_merge_list_appends() {
    let target = setup_list(&["a"]);
    let source = setup_list(&["b", "c"]);
    target.merge(&source).unwrap();

    assert_eq!(
        target.values(),
        vec![Value::from("a"), Value::from("b"), Value::from("c")]
    );
}

#[test]
fn test_merge_into_itself() {
    let model = setup_list(&["a", "b"]);
    model.merge(&model).unwrap();
    assert_eq!(model.len(), 4);

    let hash = setup_hash(&[("a", 1)]);
    hash.merge(&hash).unwrap();
    assert_eq!(hash.len(), 1);
}

#[test]
fn test_merge_kind_mismatch_is_invalid_data_set() {
    let hash = setup_hash(&[("a", 1)]);
    let list = setup_list(&["x"]);

    assert_eq!(
        hash.merge(&list).unwrap_err().kind(),
        ErrorKind::InvalidDataSet
    );
    assert_eq!(hash.len(), 1);
}

#[test]
fn test_reverse_list() {
    let model = setup_list(&["a", "b", "c"]);
    model.reverse();

    assert_eq!(model.get(0).unwrap(), Value::from("c"));
    assert_eq!(model.get(2).unwrap(), Value::from("a"));
    assert_indexes_consistent(&model);
}

#[test]
fn test_filter_hash_keeps_keys() {
    let model = setup_hash(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    let even = model.filter(|_, value| value.to_int().unwrap() % 2 == 0);

    assert_eq!(even.kind(), ModelKind::Hash);
    assert_eq!(key_names(&even), vec!["b", "d"]);
    assert_eq!(even.get("d").unwrap(), Value::from(4));
    assert_indexes_consistent(&even);

    // The source Model is untouched
    assert_eq!(model.len(), 4);
}

#[test]
fn test_filter_by_key() {
    let model = setup_list(&["a", "b", "c"]);
    let tail = model.filter(|key, _| key.as_index().is_some_and(|i| i > 0));
    assert_eq!(tail.values(), vec![Value::from("b"), Value::from("c")]);
}

#[test]
fn test_map_values_preserves_keys_and_order() {
    let model = setup_hash(&[("z", 1), ("a", 2)]);
    let doubled = model.map_values(|_, value| Value::from(value.to_int().unwrap() * 2));

    assert_eq!(key_names(&doubled), vec!["z", "a"]);
    assert_eq!(doubled.get("z").unwrap(), Value::from(2));
    assert_eq!(doubled.get("a").unwrap(), Value::from(4));
    assert_indexes_consistent(&doubled);
}

#[test]
fn test_callbacks_may_read_the_model() {
    let model = setup_hash(&[("a", 1), ("b", 2)]);
    let filtered = model.filter(|key, _| model.has(key));
    assert_eq!(filtered.len(), 2);
}

#[test]
fn test_entries_keys_values_agree() {
    let model = setup_hash(&[("k1", 1), ("k2", 2)]);
    let entries = model.entries();

    assert_eq!(
        entries.iter().map(|(k, _)| k.clone()).collect::<Vec<_>>(),
        model.keys()
    );
    assert_eq!(
        entries.into_iter().map(|(_, v)| v).collect::<Vec<_>>(),
        model.values()
    );
    assert_eq!(model.keys()[0], Key::Name("k1".into()));
}

#[test]
fn test_data_snapshot_is_detached() {
    let model = setup_hash(&[("a", 1)]);
    let snapshot = model.data();
    model.set("b", 2).unwrap();

    assert_eq!(snapshot.store.len(), 1);
    assert_eq!(model.data().store.len(), 2);
}
