//! Error types for Model and Value operations.
//!
//! Every fallible operation on a [`Model`](crate::Model) or a
//! [`Value`](crate::Value) reports one of a small, closed set of failure
//! kinds. Callers are expected to branch on [`ModelError::kind`] (or the
//! `is_*` helpers) rather than on the rendered message.

use thiserror::Error;

use super::ModelKind;

/// Structured error types for Model and Value operations.
///
/// Each variant carries the offending key or value rendered as text so the
/// failure can be diagnosed without inspecting the Model's internal state.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The key does not exist (Hash) or the position is out of range (List)
    #[error("specified index does not exist: '{key}'")]
    InvalidIndex { key: String },

    /// The key has the wrong datatype for the Model's kind
    #[error("an invalid index datatype was used: '{key}' must be an integer")]
    InvalidIndexType { key: String },

    /// A method was used on a Model of the wrong kind, e.g. `push` on a Hash
    #[error("{method}() is not valid for {kind} models")]
    InvalidMethodContext {
        method: &'static str,
        kind: ModelKind,
    },

    /// An attempt was made to modify a read-only property
    #[error("cannot update read-only property '{property}'")]
    ReadOnlyProperty { property: &'static str },

    /// A data set does not match the Model's kind
    #[error("invalid data set: expected {expected}, found {found}")]
    InvalidDataSet { expected: String, found: String },

    /// A Value could not be coerced to the requested type
    #[error("could not convert value '{value}' to {target}")]
    TypeConversionFailed { value: String, target: &'static str },
}

/// The kind of a [`ModelError`], without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidIndex,
    InvalidIndexType,
    InvalidMethodContext,
    ReadOnlyProperty,
    InvalidDataSet,
    TypeConversionFailed,
}

impl ModelError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            ModelError::InvalidIndexType { .. } => ErrorKind::InvalidIndexType,
            ModelError::InvalidMethodContext { .. } => ErrorKind::InvalidMethodContext,
            ModelError::ReadOnlyProperty { .. } => ErrorKind::ReadOnlyProperty,
            ModelError::InvalidDataSet { .. } => ErrorKind::InvalidDataSet,
            ModelError::TypeConversionFailed { .. } => ErrorKind::TypeConversionFailed,
        }
    }

    /// Check if this error indicates a missing key or an out-of-range position
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::InvalidIndex { .. })
    }

    /// Check if this error was caused by a key of the wrong type
    pub fn is_index_type_error(&self) -> bool {
        matches!(self, ModelError::InvalidIndexType { .. })
    }

    /// Check if this error was caused by using an operation on the wrong kind of Model
    pub fn is_context_error(&self) -> bool {
        matches!(self, ModelError::InvalidMethodContext { .. })
    }

    /// Check if this error is a data shape mismatch
    pub fn is_data_set_error(&self) -> bool {
        matches!(self, ModelError::InvalidDataSet { .. })
    }

    /// Check if this error is a failed Value coercion
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, ModelError::TypeConversionFailed { .. })
    }

    /// Get the offending key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            ModelError::InvalidIndex { key } | ModelError::InvalidIndexType { key } => Some(key),
            _ => None,
        }
    }
}

// Conversion from ModelError to the main Error type
impl From<ModelError> for crate::Error {
    fn from(err: ModelError) -> Self {
        crate::Error::Model(err)
    }
}
