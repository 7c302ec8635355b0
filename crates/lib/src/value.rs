//! Type-erased values stored in and read from Models.
//!
//! A [`Value`] wraps exactly one [`Datum`], the closed set of things a
//! [`Model`] can hold: scalars, raw containers, and shared references to
//! nested Models. Values are immutable; every accessor is a pure conversion of
//! the wrapped datum and never changes it.
//!
//! # Coercion
//!
//! The scalar accessors ([`Value::to_bool`], [`Value::to_int`],
//! [`Value::to_f32`], [`Value::to_f64`], [`Value::to_text`]) make a
//! best-effort conversion: numbers widen and narrow, text is parsed, and
//! booleans map to `0`/`1`. The container accessors ([`Value::list`],
//! [`Value::map`], [`Value::model`]) never coerce; they succeed only when the
//! datum already has the requested shape.
//!
//! ```
//! use duomodel::Value;
//!
//! let value = Value::from("42");
//! assert_eq!(value.to_int().unwrap(), 42);
//! assert_eq!(value.to_f64().unwrap(), 42.0);
//! assert!(value.list().is_err());
//! ```

use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::model::{Model, ModelError};

/// The data a [`Value`] can wrap.
///
/// Nested Models are held by `Arc` so that reading a Model out of its parent
/// yields the same Model, not a copy. Two `Datum::Model`s are equal only when
/// they point at the same Model.
#[derive(Debug, Clone)]
pub enum Datum {
    // Scalars
    /// Absence of a value
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value that may not fit in an `i64`
    UInt(u64),
    /// Single-precision float
    Float32(f32),
    /// Double-precision float
    Float64(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),

    // Containers
    /// A raw sequence of values
    List(Vec<Value>),
    /// A raw string-keyed mapping of values
    Map(BTreeMap<String, Value>),
    /// A shared reference to a nested Model
    Model(Arc<Model>),
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Datum::Null, Datum::Null) => true,
            (Datum::Bool(a), Datum::Bool(b)) => a == b,
            (Datum::Int(a), Datum::Int(b)) => a == b,
            (Datum::UInt(a), Datum::UInt(b)) => a == b,
            (Datum::Float32(a), Datum::Float32(b)) => a == b,
            (Datum::Float64(a), Datum::Float64(b)) => a == b,
            (Datum::Text(a), Datum::Text(b)) => a == b,
            (Datum::Bytes(a), Datum::Bytes(b)) => a == b,
            (Datum::List(a), Datum::List(b)) => a == b,
            (Datum::Map(a), Datum::Map(b)) => a == b,
            (Datum::Model(a), Datum::Model(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// An immutable wrapper over a single [`Datum`].
///
/// Every read from a [`Model`] produces a fresh `Value`; the datum inside is a
/// clone of what the Model stores (nested Models are shared, not copied).
#[derive(Debug, Clone, PartialEq)]
pub struct Value(Datum);

impl Value {
    /// The null value
    pub const NULL: Value = Value(Datum::Null);

    /// Wraps a datum
    pub fn new(datum: Datum) -> Self {
        Value(datum)
    }

    /// Returns the wrapped datum. This is the only accessor that cannot fail.
    pub fn value(&self) -> &Datum {
        &self.0
    }

    /// Unwraps into the datum
    pub fn into_datum(self) -> Datum {
        self.0
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match &self.0 {
            Datum::Null => "null",
            Datum::Bool(_) => "bool",
            Datum::Int(_) => "int",
            Datum::UInt(_) => "uint",
            Datum::Float32(_) => "float32",
            Datum::Float64(_) => "float64",
            Datum::Text(_) => "text",
            Datum::Bytes(_) => "bytes",
            Datum::List(_) => "list",
            Datum::Map(_) => "map",
            Datum::Model(_) => "model",
        }
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self.0, Datum::Null)
    }

    /// Returns true if this value holds a scalar
    pub fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    /// Returns true if this value holds a raw container or a Model
    pub fn is_container(&self) -> bool {
        matches!(self.0, Datum::List(_) | Datum::Map(_) | Datum::Model(_))
    }

    /// Converts to a boolean.
    ///
    /// Numbers are true when non-zero, text must be one of `1`, `t`, `T`,
    /// `TRUE`, `true`, `True` or their false counterparts, and null is false.
    pub fn to_bool(&self) -> Result<bool, ModelError> {
        match &self.0 {
            Datum::Null => Ok(false),
            Datum::Bool(b) => Ok(*b),
            Datum::Int(n) => Ok(*n != 0),
            Datum::UInt(n) => Ok(*n != 0),
            Datum::Float32(n) => Ok(*n != 0.0),
            Datum::Float64(n) => Ok(*n != 0.0),
            Datum::Text(s) => parse_bool(s).ok_or_else(|| self.conversion_error("a boolean")),
            _ => Err(self.conversion_error("a boolean")),
        }
    }

    /// Converts to a signed integer.
    ///
    /// Floats are truncated toward zero and must be finite and in range.
    /// Text must be an integer, optionally followed by an all-zero decimal
    /// part (`"10.00"`).
    pub fn to_int(&self) -> Result<i64, ModelError> {
        let converted = match &self.0 {
            Datum::Null => Some(0),
            Datum::Bool(b) => Some(i64::from(*b)),
            Datum::Int(n) => Some(*n),
            Datum::UInt(n) => i64::try_from(*n).ok(),
            Datum::Float32(n) => float_to_int(f64::from(*n)),
            Datum::Float64(n) => float_to_int(*n),
            Datum::Text(s) => parse_int(s),
            _ => None,
        };
        converted.ok_or_else(|| self.conversion_error("an int"))
    }

    /// Converts to a single-precision float
    pub fn to_f32(&self) -> Result<f32, ModelError> {
        let converted = match &self.0 {
            Datum::Null => Some(0.0),
            Datum::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Datum::Int(n) => Some(*n as f32),
            Datum::UInt(n) => Some(*n as f32),
            Datum::Float32(n) => Some(*n),
            Datum::Float64(n) => Some(*n as f32),
            Datum::Text(s) => s.parse::<f32>().ok(),
            _ => None,
        };
        converted.ok_or_else(|| self.conversion_error("a float32"))
    }

    /// Converts to a double-precision float
    pub fn to_f64(&self) -> Result<f64, ModelError> {
        let converted = match &self.0 {
            Datum::Null => Some(0.0),
            Datum::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Datum::Int(n) => Some(*n as f64),
            Datum::UInt(n) => Some(*n as f64),
            Datum::Float32(n) => Some(f64::from(*n)),
            Datum::Float64(n) => Some(*n),
            Datum::Text(s) => s.parse::<f64>().ok(),
            _ => None,
        };
        converted.ok_or_else(|| self.conversion_error("a float64"))
    }

    /// Converts to text.
    ///
    /// Numbers and booleans render in their shortest form, bytes must be valid
    /// UTF-8, and null becomes the empty string. Containers are rejected.
    pub fn to_text(&self) -> Result<String, ModelError> {
        match &self.0 {
            Datum::Null => Ok(String::new()),
            Datum::Bool(b) => Ok(b.to_string()),
            Datum::Int(n) => Ok(n.to_string()),
            Datum::UInt(n) => Ok(n.to_string()),
            Datum::Float32(n) => Ok(n.to_string()),
            Datum::Float64(n) => Ok(n.to_string()),
            Datum::Text(s) => Ok(s.clone()),
            Datum::Bytes(b) => {
                String::from_utf8(b.clone()).map_err(|_| self.conversion_error("a string"))
            }
            _ => Err(self.conversion_error("a string")),
        }
    }

    /// Returns the raw sequence, if this value already is one
    pub fn list(&self) -> Result<&[Value], ModelError> {
        match &self.0 {
            Datum::List(items) => Ok(items),
            _ => Err(self.conversion_error("an array")),
        }
    }

    /// Returns the raw string-keyed mapping, if this value already is one
    pub fn map(&self) -> Result<&BTreeMap<String, Value>, ModelError> {
        match &self.0 {
            Datum::Map(map) => Ok(map),
            _ => Err(self.conversion_error("a map")),
        }
    }

    /// Returns the nested Model, if this value references one.
    ///
    /// The returned `Arc` points at the same Model the parent stores.
    pub fn model(&self) -> Result<Arc<Model>, ModelError> {
        match &self.0 {
            Datum::Model(model) => Ok(Arc::clone(model)),
            _ => Err(self.conversion_error("a Model")),
        }
    }

    fn conversion_error(&self, target: &'static str) -> ModelError {
        ModelError::TypeConversionFailed {
            value: self.to_string(),
            target,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_int(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    // "10.000" is accepted, "10.5" is not
    let (whole, frac) = s.split_once('.')?;
    if frac.bytes().all(|b| b == b'0') {
        whole.parse::<i64>().ok()
    } else {
        None
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the bound is exclusive
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// The default string form of a value.
///
/// This is the rendering used in error messages and when a non-scalar is used
/// as a Hash key.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => write!(f, "null"),
            Datum::Bool(b) => write!(f, "{b}"),
            Datum::Int(n) => write!(f, "{n}"),
            Datum::UInt(n) => write!(f, "{n}"),
            Datum::Float32(n) => write!(f, "{n}"),
            Datum::Float64(n) => write!(f, "{n}"),
            Datum::Text(s) => write!(f, "{s}"),
            Datum::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Datum::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Datum::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                write!(f, "}}")
            }
            Datum::Model(model) => write!(f, "{model}"),
        }
    }
}

impl From<Datum> for Value {
    fn from(datum: Datum) -> Self {
        Value(datum)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value(Datum::Bool(value))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value(Datum::Int(i64::from(value)))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value(Datum::Int(value as i64))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value(Datum::UInt(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value(Datum::UInt(value as u64))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value(Datum::Float32(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value(Datum::Float64(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value(Datum::Text(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value(Datum::Text(value.to_string()))
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value(Datum::Bytes(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value(Datum::Bytes(value.to_vec()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value(Datum::List(value))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value(Datum::Map(value))
    }
}

impl From<Model> for Value {
    fn from(value: Model) -> Self {
        Value(Datum::Model(Arc::new(value)))
    }
}

impl From<Arc<Model>> for Value {
    fn from(value: Arc<Model>) -> Self {
        Value(Datum::Model(value))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::NULL, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value(Datum::List(iter.into_iter().collect()))
    }
}
