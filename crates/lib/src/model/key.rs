//! Entry keys and Hash key normalization.

use std::fmt;

use crate::value::{Datum, Value};

/// The key of an entry as reported by iteration.
///
/// List Models report the entry's position, Hash Models report the entry's
/// normalized key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Position in a List Model
    Index(usize),
    /// Normalized key in a Hash Model
    Name(String),
}

impl Key {
    /// Returns the position, if this is a List key
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Returns the normalized name, if this is a Hash key
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Index(i) => Value::from(i),
            Key::Name(name) => Value::from(name),
        }
    }
}

impl From<&Key> for Value {
    fn from(key: &Key) -> Self {
        Value::from(key.clone())
    }
}

/// Renders a key to the canonical string used for Hash lookups.
///
/// Text passes through and bytes pass through as (lossy) UTF-8. Integers
/// render in decimal. Floats render with exactly 10 fractional digits: a
/// `Float64` is rounded, a `Float32` is expanded and then truncated. Any
/// other datum uses its default string form.
///
/// Two keys address the same entry iff their normalized forms are equal.
///
/// ```
/// use duomodel::{Value, normalize_key};
///
/// assert_eq!(normalize_key(&Value::from("name")), "name");
/// assert_eq!(normalize_key(&Value::from(10)), "10");
/// assert_eq!(normalize_key(&Value::from(1234567890.0)), "1234567890.0000000000");
/// ```
pub fn normalize_key(key: &Value) -> String {
    match key.value() {
        Datum::Text(s) => s.clone(),
        Datum::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Datum::Int(n) => n.to_string(),
        Datum::UInt(n) => n.to_string(),
        Datum::Float32(n) => truncate_fraction(&format!("{n:.25}"), 10),
        Datum::Float64(n) => format!("{n:.10}"),
        _ => key.to_string(),
    }
}

fn truncate_fraction(formatted: &str, digits: usize) -> String {
    match formatted.split_once('.') {
        Some((whole, frac)) => {
            let frac: String = frac.chars().take(digits).collect();
            format!("{whole}.{frac}")
        }
        None => formatted.to_string(),
    }
}
