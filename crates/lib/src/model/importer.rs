//! Conversion of generic decoded trees into Model trees.
//!
//! The importer walks a [`serde_json::Value`] and builds an isomorphic tree of
//! Models: objects become Hash Models, arrays become List Models, and every
//! nested container is converted before insertion, so no raw container is left
//! in the result. Hash Models are sorted by key once populated; List Models
//! keep their element order.
//!
//! ```
//! use duomodel::{Key, import};
//!
//! let tree = serde_json::json!({"b": [1, 2], "a": {"k": "v"}});
//! let model = import(&tree).unwrap();
//! assert_eq!(model.keys(), vec![Key::Name("a".into()), Key::Name("b".into())]);
//!
//! // Bare scalars cannot become Models
//! assert!(import(&serde_json::json!(42)).is_none());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{Model, ModelError, ModelKind, SortFlag};
use crate::value::{Datum, Value};

/// Importer configuration.
///
/// Deserializable with defaults, so it can be embedded in a caller's own
/// configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Sort every imported Hash Model by key (default `true`)
    pub sort_hash_keys: bool,
    /// Maximum container nesting below the root; `None` means unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            sort_hash_keys: true,
            max_depth: None,
        }
    }
}

/// Builds Model trees from generic decoded trees.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    config: ImportConfig,
}

/// Imports a tree with the default configuration.
///
/// Returns `None` when the tree is a scalar rather than an object or array.
pub fn import(tree: &JsonValue) -> Option<Arc<Model>> {
    Importer::new().import(tree).ok()
}

impl Importer {
    /// Creates an importer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an importer with the given configuration
    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Returns the importer's configuration
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Imports `tree` into a new Model.
    ///
    /// # Errors
    /// [`ModelError::InvalidDataSet`] if `tree` is a scalar or nests deeper
    /// than the configured maximum.
    pub fn import(&self, tree: &JsonValue) -> Result<Arc<Model>, ModelError> {
        let kind = tree_kind(tree)?;
        let model = Model::new(kind);
        self.populate(&model, tree, 0)?;
        tracing::debug!(%kind, entries = model.len(), "Imported model");
        Ok(Arc::new(model))
    }

    /// Imports `tree` into an existing Model.
    ///
    /// An empty Model adopts the tree's kind. Entries of a non-empty Model are
    /// kept: Hash keys present in the tree are overwritten and new keys
    /// appended, List elements are appended.
    ///
    /// # Errors
    /// [`ModelError::InvalidDataSet`] if `tree` is a scalar, does not match
    /// the kind of a non-empty Model, or nests too deeply.
    pub fn import_into(&self, model: &Model, tree: &JsonValue) -> Result<(), ModelError> {
        let kind = tree_kind(tree)?;
        if model.kind() != kind && model.set_kind(kind).is_err() {
            return Err(ModelError::InvalidDataSet {
                expected: format!("data for a {} model", model.kind()),
                found: format!("data for a {kind} model"),
            });
        }
        self.populate(model, tree, 0)?;
        tracing::debug!(%kind, entries = model.len(), "Imported into model");
        Ok(())
    }

    fn populate(&self, model: &Model, tree: &JsonValue, depth: usize) -> Result<(), ModelError> {
        match tree {
            JsonValue::Object(map) => {
                for (key, item) in map {
                    model.set(key.as_str(), self.convert(item, depth + 1)?)?;
                }
                if self.config.sort_hash_keys {
                    model.sort(SortFlag::ByKey);
                }
            }
            JsonValue::Array(items) => {
                for item in items {
                    model.push(self.convert(item, depth + 1)?)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Converts one node, recursing into containers
    fn convert(&self, node: &JsonValue, depth: usize) -> Result<Value, ModelError> {
        let kind = match node {
            JsonValue::Object(_) => ModelKind::Hash,
            JsonValue::Array(_) => ModelKind::List,
            scalar => return Ok(scalar_value(scalar)),
        };
        if let Some(max_depth) = self.config.max_depth
            && depth > max_depth
        {
            return Err(ModelError::InvalidDataSet {
                expected: format!("at most {max_depth} levels of nesting"),
                found: format!("{depth} levels"),
            });
        }
        let child = Model::new(kind);
        self.populate(&child, node, depth)?;
        Ok(Value::from(child))
    }
}

fn tree_kind(tree: &JsonValue) -> Result<ModelKind, ModelError> {
    match tree {
        JsonValue::Object(_) => Ok(ModelKind::Hash),
        JsonValue::Array(_) => Ok(ModelKind::List),
        scalar => Err(ModelError::InvalidDataSet {
            expected: "an object or an array".to_string(),
            found: scalar_value(scalar).type_name().to_string(),
        }),
    }
}

/// Converts a scalar node. Numbers become `Int` when they fit an `i64`, then
/// `UInt`, then `Float64`.
fn scalar_value(node: &JsonValue) -> Value {
    let datum = match node {
        JsonValue::Null => Datum::Null,
        JsonValue::Bool(b) => Datum::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Datum::Int(i)
            } else if let Some(u) = n.as_u64() {
                Datum::UInt(u)
            } else {
                Datum::Float64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => Datum::Text(s.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => Datum::Null,
    };
    Value::new(datum)
}
