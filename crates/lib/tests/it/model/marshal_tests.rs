//! Encoding and decoding tests

use std::sync::Arc;

use duomodel::{Marshaler, Model, ModelKind, Unmarshaler, Value};
use serde::Deserialize;

use crate::helpers::*;

#[test]
fn test_round_trip_reproduces_document() {
    let model = Model::from_json(SAMPLE_JSON).unwrap();
    let expected: serde_json::Value = serde_json::from_str(SAMPLE_JSON).unwrap();

    assert_eq!(model.to_tree().unwrap(), expected);
    assert_eq!(model.to_json().unwrap(), SAMPLE_JSON);
}

#[test]
fn test_marshal_float_keys_use_canonical_form() {
    let model = Model::new(ModelKind::Hash);
    model.set(1234567890.0f64, "big").unwrap();
    model.set(0.1f32, "small").unwrap();

    let bytes = model.marshal_model().unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"1234567890.0000000000":"big","0.1000000014":"small"}"#
    );
}

#[test]
fn test_marshal_list_with_nested_models() {
    let child = Model::new(ModelKind::Hash);
    child.set("k", 1).unwrap();

    let model = Model::new(ModelKind::List);
    model.push(child).unwrap();
    model.push(Value::NULL).unwrap();
    model.push(2.5).unwrap();

    assert_eq!(model.to_json().unwrap(), r#"[{"k":1},null,2.5]"#);
}

#[test]
fn test_pretty_output_parses_back() {
    let model = Model::from_json(SAMPLE_JSON).unwrap();
    let pretty = model.to_json_pretty().unwrap();

    assert!(pretty.contains('\n'));
    let reparsed = Model::from_json(&pretty).unwrap();
    assert_eq!(reparsed.to_json().unwrap(), SAMPLE_JSON);
}

#[test]
fn test_unmarshal_null_is_a_no_op() {
    let model = setup_hash(&[("kept", 1)]);
    model.unmarshal_model(b"null").unwrap();

    assert_eq!(model.len(), 1);
    assert_eq!(model.get("kept").unwrap(), Value::from(1));
}

#[test]
fn test_unmarshal_into_empty_model() {
    let model = Model::new(ModelKind::Hash);
    model.unmarshal_model(SAMPLE_JSON.as_bytes()).unwrap();

    assert_eq!(key_names(&model), vec!["key1", "key2", "key3", "key4"]);
}

#[test]
fn test_unmarshal_errors() {
    let model = Model::new(ModelKind::Hash);

    let err = model.unmarshal_model(b"{not json").unwrap_err();
    assert!(err.is_serialization_error());

    let err = model.unmarshal_model(b"7").unwrap_err();
    assert_eq!(err.module(), "model");
    assert!(!err.is_serialization_error());
}

#[test]
fn test_self_containing_model_fails_to_encode() {
    let model = Arc::new(Model::new(ModelKind::Hash));
    model.set("name", "loop").unwrap();
    model.set("self", Arc::clone(&model)).unwrap();

    let err = model.to_json().unwrap_err();
    assert!(err.is_serialization_error());
    assert!(err.to_string().contains("cyclic model reference"));
    assert!(model.to_tree().is_err());
    assert!(model.marshal_model().is_err());

    // Breaking the cycle makes the Model encodable again
    model.delete("self").unwrap();
    assert_eq!(model.to_json().unwrap(), r#"{"name":"loop"}"#);
}

#[test]
fn test_indirect_cycle_fails_to_encode() {
    let outer = Arc::new(Model::new(ModelKind::List));
    let inner = Arc::new(Model::new(ModelKind::Hash));
    inner.set("back", Arc::clone(&outer)).unwrap();
    outer.push(Arc::clone(&inner)).unwrap();

    assert!(outer.to_json().is_err());
    assert!(inner.to_json_pretty().is_err());

    inner.delete("back").unwrap();
    assert_eq!(outer.to_json().unwrap(), "[{}]");
}

#[test]
fn test_from_json_rejects_scalar_documents() {
    assert!(Model::from_json("\"just text\"").is_err());
}

#[derive(Deserialize)]
struct Document {
    title: String,
    body: Model,
}

#[test]
fn test_model_deserializes_inside_other_types() {
    let doc: Document =
        serde_json::from_str(r#"{"title": "t", "body": {"b": [1], "a": null}}"#).unwrap();

    assert_eq!(doc.title, "t");
    assert_eq!(doc.body.kind(), ModelKind::Hash);
    assert_eq!(key_names(&doc.body), vec!["a", "b"]);
    assert!(doc.body.get("a").unwrap().is_null());
}
