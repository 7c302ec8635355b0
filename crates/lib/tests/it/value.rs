//! Value coercion and accessor tests

use std::collections::BTreeMap;

use duomodel::{Datum, ErrorKind, Model, ModelKind, Value};

#[test]
fn test_value_returns_wrapped_datum() {
    let value = Value::from("hello");
    assert!(matches!(value.value(), Datum::Text(s) if s == "hello"));
    assert!(matches!(Value::from(5u64).into_datum(), Datum::UInt(5)));
}

#[test]
fn test_to_bool() {
    assert!(Value::from(true).to_bool().unwrap());
    assert!(Value::from(3).to_bool().unwrap());
    assert!(!Value::from(0.0).to_bool().unwrap());
    assert!(Value::from("TRUE").to_bool().unwrap());
    assert!(!Value::from("f").to_bool().unwrap());
    assert!(!Value::NULL.to_bool().unwrap());

    let err = Value::from("maybe").to_bool().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeConversionFailed);
    assert!(err.to_string().contains("maybe"));
}

#[test]
fn test_to_int() {
    assert_eq!(Value::from(42).to_int().unwrap(), 42);
    assert_eq!(Value::from("17").to_int().unwrap(), 17);
    assert_eq!(Value::from("10.00").to_int().unwrap(), 10);
    assert_eq!(Value::from(9.99).to_int().unwrap(), 9);
    assert_eq!(Value::from(true).to_int().unwrap(), 1);
    assert_eq!(Value::from(7u64).to_int().unwrap(), 7);

    assert!(Value::from(u64::MAX).to_int().is_err());
    assert!(Value::from("10.5").to_int().is_err());
    assert!(Value::from(f64::NAN).to_int().is_err());
}

#[test]
fn test_to_floats() {
    assert_eq!(Value::from("2.5").to_f64().unwrap(), 2.5);
    assert_eq!(Value::from(3).to_f64().unwrap(), 3.0);
    assert_eq!(Value::from(1.5f32).to_f64().unwrap(), 1.5);
    assert_eq!(Value::from(0.25).to_f32().unwrap(), 0.25f32);
    assert_eq!(Value::from(false).to_f32().unwrap(), 0.0);

    assert!(Value::from("abc").to_f64().is_err());
    assert!(Value::from(vec![Value::from(1)]).to_f32().is_err());
}

#[test]
fn test_to_text() {
    assert_eq!(Value::from(12).to_text().unwrap(), "12");
    assert_eq!(Value::from(true).to_text().unwrap(), "true");
    assert_eq!(Value::from(2.5).to_text().unwrap(), "2.5");
    assert_eq!(Value::from(b"raw".as_slice()).to_text().unwrap(), "raw");
    assert_eq!(Value::NULL.to_text().unwrap(), "");

    assert!(Value::from(vec![0xffu8, 0xfe]).to_text().is_err());
    let err = Value::from(Model::new(ModelKind::Hash)).to_text().unwrap_err();
    assert!(err.is_conversion_error());
}

#[test]
fn test_container_accessors_never_coerce() {
    let list: Value = vec![Value::from(1), Value::from(2)].into();
    assert_eq!(list.list().unwrap().len(), 2);
    assert!(list.map().is_err());
    assert!(list.model().is_err());

    let mut entries = BTreeMap::new();
    entries.insert("k".to_string(), Value::from("v"));
    let map = Value::from(entries);
    assert_eq!(map.map().unwrap()["k"], Value::from("v"));
    assert!(map.list().is_err());

    // Text is not a sequence, even if it looks like one
    assert!(Value::from("[1, 2]").list().is_err());
}

#[test]
fn test_model_accessor_returns_shared_model() {
    let value = Value::from(Model::new(ModelKind::List));
    let first = value.model().unwrap();
    first.push("x").unwrap();

    assert_eq!(value.model().unwrap().len(), 1);
}

#[test]
fn test_conversions_into_value() {
    assert_eq!(Value::from(Some(3)), Value::from(3));
    assert!(Value::from(None::<i64>).is_null());
    assert_eq!(Value::from(5u8), Value::from(5i64));
    assert!(Value::from(1).is_scalar());
    assert!(Value::from(Model::new(ModelKind::Hash)).is_container());

    let collected: Value = (1..=3).map(Value::from).collect();
    assert_eq!(collected.list().unwrap().len(), 3);
}
