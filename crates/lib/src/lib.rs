//!
//! duomodel: dynamically-typed, order-preserving data containers.
//!
//! ## Core Concepts
//!
//! * **Models (`model::Model`)**: A single container type that is either an ordered keyed mapping (Hash) or a positional sequence (List), chosen at creation and fixed once the Model holds data.
//! * **Values (`value::Value`)**: Immutable wrappers over a closed set of data (`value::Datum`) with best-effort coercion to booleans, integers, floats and text.
//! * **Keys (`model::Key`)**: Hash keys of any type are normalized to canonical strings (`model::normalize_key`); List keys are integer positions.
//! * **Cursors (`model::Cursor`)**: Every Model carries a shared iteration cursor, and can hand out independent cursors that implement `Iterator`.
//! * **Import/Export (`model::Importer`, `model::Marshaler`)**: Nested generic trees (`serde_json::Value`) convert to Model trees and back, with Hash Models sorted by key on import.
//!
//! ## Example
//!
//! ```
//! use duomodel::Model;
//!
//! let model = Model::from_json(r#"{"name": "duo", "tags": ["a", "b"]}"#).unwrap();
//! let tags = model.get("tags").unwrap().model().unwrap();
//! assert_eq!(tags.get(1).unwrap().to_text().unwrap(), "b");
//! assert_eq!(model.to_json().unwrap(), r#"{"name":"duo","tags":["a","b"]}"#);
//! ```

pub mod model;
pub mod value;

pub use model::{
    Cursor, ErrorKind, ImportConfig, Importer, Key, Marshaler, Model, ModelData, ModelError,
    ModelKind, SortFlag, Unmarshaler, import, normalize_key,
};
pub use value::{Datum, Value};

/// Result type used throughout the duomodel library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the duomodel library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured Model and Value errors from the model module
    #[error(transparent)]
    Model(model::ModelError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Model(_) => "model",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Get the Model error kind, if this error came from a Model or Value operation.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Model(err) => Some(err.kind()),
            Error::Serialize(_) => None,
        }
    }

    /// Check if this error indicates a missing key or out-of-range position.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Model(err) => err.is_not_found(),
            Error::Serialize(_) => false,
        }
    }

    /// Check if this error came from encoding or decoding.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }
}
