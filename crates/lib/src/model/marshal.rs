//! Encoding Models to, and decoding them from, the generic tree format.
//!
//! A Hash Model encodes as a JSON object whose members follow the Model's
//! store order; a List Model encodes as a JSON array. Decoding goes through
//! the [`Importer`](super::Importer), so a decoded Model tree holds nested
//! Models rather than raw containers.
//!
//! ```
//! use duomodel::{Marshaler, Model, Unmarshaler};
//!
//! let model = Model::hash();
//! model.unmarshal_model(br#"{"b": 1, "a": [true]}"#).unwrap();
//! assert_eq!(model.marshal_model().unwrap(), br#"{"a":[true],"b":1}"#);
//! ```

use std::cell::RefCell;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};
use serde_json::Value as JsonValue;

use super::{Importer, Key, Model, ModelKind};
use crate::value::{Datum, Value};

/// Implemented by types that can serialize themselves to bytes.
pub trait Marshaler {
    fn marshal_model(&self) -> crate::Result<Vec<u8>>;
}

/// Implemented by Models that can load a serialized description of
/// themselves.
///
/// By convention, unmarshaling the literal `null` is a no-op.
pub trait Unmarshaler {
    fn unmarshal_model(&self, bytes: &[u8]) -> crate::Result<()>;
}

impl Model {
    /// Returns the Model's content as a plain JSON tree (encode-self)
    pub fn to_tree(&self) -> crate::Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    /// Encodes the Model as a compact JSON string
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the Model as an indented JSON string
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes a JSON document into a new Model tree using the default
    /// [`Importer`]
    pub fn from_json(json: &str) -> crate::Result<std::sync::Arc<Model>> {
        let tree: JsonValue = serde_json::from_str(json)?;
        Ok(Importer::new().import(&tree)?)
    }
}

impl Marshaler for Model {
    fn marshal_model(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Unmarshaler for Model {
    fn unmarshal_model(&self, bytes: &[u8]) -> crate::Result<()> {
        let tree: JsonValue = serde_json::from_slice(bytes)?;
        if tree.is_null() {
            return Ok(());
        }
        Importer::new().import_into(self, &tree)?;
        Ok(())
    }
}

thread_local! {
    /// Models currently being serialized on this thread, outermost first
    static ENCODING: RefCell<Vec<*const Model>> = const { RefCell::new(Vec::new()) };
}

/// Marks a Model as being serialized until dropped.
struct Visit(*const Model);

impl Visit {
    /// Returns `None` if `model` is already being serialized further up the
    /// tree, i.e. it contains itself.
    fn enter(model: &Model) -> Option<Visit> {
        let ptr: *const Model = model;
        ENCODING.with_borrow_mut(|stack| {
            if stack.contains(&ptr) {
                None
            } else {
                stack.push(ptr);
                Some(Visit(ptr))
            }
        })
    }
}

impl Drop for Visit {
    fn drop(&mut self) {
        ENCODING.with_borrow_mut(|stack| {
            if let Some(pos) = stack.iter().rposition(|&ptr| ptr == self.0) {
                stack.remove(pos);
            }
        });
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let _visit = Visit::enter(self).ok_or_else(|| {
            <S::Error as serde::ser::Error>::custom("cyclic model reference")
        })?;
        // Copy the entries out first: nested Models lock themselves while
        // they serialize.
        let (kind, entries) = self.snapshot();
        match kind {
            ModelKind::Hash => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in &entries {
                    if let Key::Name(name) = key {
                        map.serialize_entry(name, value)?;
                    }
                }
                map.end()
            }
            ModelKind::List => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for (_, value) in &entries {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

/// Decodes any self-describing tree and imports it with the default
/// [`Importer`]. `null` decodes to an empty Hash Model.
impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tree = JsonValue::deserialize(deserializer)?;
        let model = Model::hash();
        if !tree.is_null() {
            Importer::new()
                .import_into(&model, &tree)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(model)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value().serialize(serializer)
    }
}

impl Serialize for Datum {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Datum::Null => serializer.serialize_unit(),
            Datum::Bool(b) => serializer.serialize_bool(*b),
            Datum::Int(n) => serializer.serialize_i64(*n),
            Datum::UInt(n) => serializer.serialize_u64(*n),
            Datum::Float32(n) => serializer.serialize_f32(*n),
            Datum::Float64(n) => serializer.serialize_f64(*n),
            Datum::Text(s) => serializer.serialize_str(s),
            Datum::Bytes(b) => serializer.serialize_bytes(b),
            Datum::List(items) => items.serialize(serializer),
            Datum::Map(map) => map.serialize(serializer),
            Datum::Model(model) => model.serialize(serializer),
        }
    }
}
