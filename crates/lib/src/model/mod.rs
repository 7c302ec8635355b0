//! The dual-mode Model container.
//!
//! A [`Model`] is either an ordered keyed mapping ([`ModelKind::Hash`]) or a
//! positional sequence ([`ModelKind::List`]). Both kinds share one backing
//! store whose positions define iteration order; Hash Models additionally keep
//! two cross-reference indexes (key to position and position to key) that are
//! exact inverses of each other at all times.
//!
//! # Usage
//!
//! ```
//! use duomodel::{Model, ModelKind};
//!
//! let hash = Model::new(ModelKind::Hash);
//! hash.set("name", "Alice").unwrap();
//! hash.set(10, "ten").unwrap();
//! assert_eq!(hash.get("name").unwrap().to_text().unwrap(), "Alice");
//! assert!(hash.has("10"));
//!
//! let list = Model::new(ModelKind::List);
//! list.push("one").unwrap();
//! list.push("two").unwrap();
//! assert_eq!(list.get(1).unwrap().to_text().unwrap(), "two");
//! ```
//!
//! # Locking
//!
//! Every Model owns a single mutex guarding its store, its indexes and its
//! cursor. All operations take `&self`, hold the lock for their whole critical
//! section, and never call back into another locking operation on the same
//! Model while holding it. Nested Models are shared through `Arc`.

use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};

use crate::value::{Datum, Value};

pub mod errors;
pub mod importer;
pub mod iterator;
pub mod key;
pub mod marshal;
pub mod sorter;

pub use errors::{ErrorKind, ModelError};
pub use importer::{ImportConfig, Importer, import};
pub use iterator::Cursor;
pub use key::{Key, normalize_key};
pub use marshal::{Marshaler, Unmarshaler};
pub use sorter::SortFlag;

/// Selects the key semantics of a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Keyed mapping; keys are normalized strings
    Hash,
    /// Positional sequence; keys are integer positions
    List,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Hash => write!(f, "hash"),
            ModelKind::List => write!(f, "list"),
        }
    }
}

/// A snapshot of a Model's backing store and indexes.
///
/// The indexes are always empty for List Models.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub kind: ModelKind,
    pub store: Vec<Value>,
    pub key_to_pos: HashMap<String, usize>,
    pub pos_to_key: HashMap<usize, String>,
}

/// A dynamically-typed, order-preserving container.
///
/// See the [module documentation](self) for an overview.
pub struct Model {
    inner: Mutex<Inner>,
}

/// Everything guarded by the Model's lock.
struct Inner {
    id: Option<Value>,
    locked: bool,
    kind: ModelKind,
    store: Vec<Value>,
    key_to_pos: HashMap<String, usize>,
    pos_to_key: HashMap<usize, String>,
    cursor: isize,
}

/// The cursor position before the first entry.
const BEFORE_FIRST: isize = -1;

/// A key resolved for both addressing modes before the lock is taken.
///
/// Rendering a key may need to lock another Model (a Model used as a key), so
/// it never happens inside a critical section.
struct Address {
    name: String,
    index: Result<usize, ModelError>,
}

impl Address {
    fn new(key: &Value) -> Self {
        Address {
            name: normalize_key(key),
            index: list_index(key),
        }
    }
}

fn list_index(key: &Value) -> Result<usize, ModelError> {
    let out_of_range = |key: String| ModelError::InvalidIndex { key };
    match key.value() {
        Datum::Int(n) => usize::try_from(*n).map_err(|_| out_of_range(n.to_string())),
        Datum::UInt(n) => usize::try_from(*n).map_err(|_| out_of_range(n.to_string())),
        _ => Err(ModelError::InvalidIndexType {
            key: key.to_string(),
        }),
    }
}

impl Inner {
    fn new(kind: ModelKind) -> Self {
        Inner {
            id: None,
            locked: false,
            kind,
            store: Vec::new(),
            key_to_pos: HashMap::new(),
            pos_to_key: HashMap::new(),
            cursor: BEFORE_FIRST,
        }
    }

    /// Resolves an address to a position in the store
    fn position(&self, address: &Address) -> Result<usize, ModelError> {
        match self.kind {
            ModelKind::Hash => {
                self.key_to_pos
                    .get(&address.name)
                    .copied()
                    .ok_or_else(|| ModelError::InvalidIndex {
                        key: address.name.clone(),
                    })
            }
            ModelKind::List => {
                let index = address.index.clone()?;
                if index < self.store.len() {
                    Ok(index)
                } else {
                    Err(ModelError::InvalidIndex {
                        key: index.to_string(),
                    })
                }
            }
        }
    }

    fn key_at(&self, pos: usize) -> Key {
        match self.kind {
            ModelKind::Hash => Key::Name(self.pos_to_key.get(&pos).cloned().unwrap_or_default()),
            ModelKind::List => Key::Index(pos),
        }
    }

    /// Reads the entry at a cursor position, `None` outside the store
    fn entry_at(&self, pos: isize) -> Option<(Key, Value)> {
        let pos = usize::try_from(pos).ok()?;
        let value = self.store.get(pos)?.clone();
        Some((self.key_at(pos), value))
    }

    fn entries(&self) -> Vec<(Key, Value)> {
        self.store
            .iter()
            .enumerate()
            .map(|(pos, value)| (self.key_at(pos), value.clone()))
            .collect()
    }

    /// Inserts a new Hash entry at the tail or overwrites an existing one in place
    fn upsert(&mut self, name: String, value: Value) {
        match self.key_to_pos.get(&name) {
            Some(&pos) => self.store[pos] = value,
            None => {
                let pos = self.store.len();
                self.key_to_pos.insert(name.clone(), pos);
                self.pos_to_key.insert(pos, name);
                self.store.push(value);
            }
        }
    }

    /// Removes the entry at `pos` and closes the gap.
    ///
    /// Hash indexes are renumbered for every entry after `pos`.
    fn remove_at(&mut self, pos: usize) {
        let old_len = self.store.len();
        self.store.remove(pos);
        if self.kind == ModelKind::List {
            return;
        }
        if let Some(name) = self.pos_to_key.remove(&pos) {
            self.key_to_pos.remove(&name);
        }
        for shifted in pos + 1..old_len {
            if let Some(name) = self.pos_to_key.remove(&shifted) {
                self.key_to_pos.insert(name.clone(), shifted - 1);
                self.pos_to_key.insert(shifted - 1, name);
            }
        }
    }

    /// Replaces the store and rebuilds both indexes from scratch.
    ///
    /// `names` must be empty for List Models and match `store` in length for
    /// Hash Models.
    fn replace(&mut self, names: Vec<String>, store: Vec<Value>) {
        self.key_to_pos.clear();
        self.pos_to_key.clear();
        for (pos, name) in names.into_iter().enumerate() {
            self.key_to_pos.insert(name.clone(), pos);
            self.pos_to_key.insert(pos, name);
        }
        self.store = store;
    }

    /// Rebuilds the store from `(key, value)` pairs in order
    fn rebuild(&mut self, entries: Vec<(Key, Value)>) {
        let mut names = Vec::new();
        let mut store = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if let Key::Name(name) = key {
                names.push(name);
            }
            store.push(value);
        }
        self.replace(names, store);
    }
}

impl Model {
    /// Creates an empty Model of the given kind
    pub fn new(kind: ModelKind) -> Self {
        Model {
            inner: Mutex::new(Inner::new(kind)),
        }
    }

    /// Creates an empty Hash Model
    pub fn hash() -> Self {
        Self::new(ModelKind::Hash)
    }

    /// Creates an empty List Model
    pub fn list() -> Self {
        Self::new(ModelKind::List)
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        // Every critical section leaves the data consistent before anything
        // that can panic, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the Model's kind
    pub fn kind(&self) -> ModelKind {
        self.inner().kind
    }

    /// Changes the Model's kind.
    ///
    /// The kind becomes read-only as soon as the Model holds any data.
    pub fn set_kind(&self, kind: ModelKind) -> Result<(), ModelError> {
        let mut inner = self.inner();
        if !inner.store.is_empty() {
            return Err(ModelError::ReadOnlyProperty { property: "kind" });
        }
        inner.kind = kind;
        Ok(())
    }

    /// Returns the application-assigned identifier, if any
    pub fn id(&self) -> Option<Value> {
        self.inner().id.clone()
    }

    /// Sets the application-assigned identifier
    pub fn set_id(&self, id: impl Into<Value>) {
        self.inner().id = Some(id.into());
    }

    /// Marks this Model as read-only.
    ///
    /// The flag is advisory: Model operations do not consult it.
    pub fn lock(&self) {
        self.inner().locked = true;
    }

    /// Returns true if [`Model::lock`] has been called
    pub fn is_locked(&self) -> bool {
        self.inner().locked
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.inner().store.len()
    }

    /// Returns true if the Model holds no entries
    pub fn is_empty(&self) -> bool {
        self.inner().store.is_empty()
    }

    /// Returns the value stored under `key`.
    ///
    /// Hash keys are normalized with [`normalize_key`]. List keys must be
    /// integers in `0..len`.
    ///
    /// # Errors
    /// - [`ModelError::InvalidIndex`] if the key is absent or out of range
    /// - [`ModelError::InvalidIndexType`] for a non-integer key on a List
    pub fn get(&self, key: impl Into<Value>) -> Result<Value, ModelError> {
        let address = Address::new(&key.into());
        let inner = self.inner();
        let pos = inner.position(&address)?;
        Ok(inner.store[pos].clone())
    }

    /// Returns true if `key` addresses an entry. Never fails.
    pub fn has(&self, key: impl Into<Value>) -> bool {
        let address = Address::new(&key.into());
        self.inner().position(&address).is_ok()
    }

    /// Stores `value` under `key`.
    ///
    /// On a Hash, a new key is appended at the tail and an existing key is
    /// overwritten in place. On a List, the key must be an existing position;
    /// `set` never grows a List (use [`Model::push`]).
    pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<(), ModelError> {
        let address = Address::new(&key.into());
        let value = value.into();
        let mut inner = self.inner();
        match inner.kind {
            ModelKind::Hash => inner.upsert(address.name, value),
            ModelKind::List => {
                let pos = inner.position(&address)?;
                inner.store[pos] = value;
            }
        }
        Ok(())
    }

    /// Appends `value` to a List.
    ///
    /// # Errors
    /// [`ModelError::InvalidMethodContext`] on a Hash Model.
    pub fn push(&self, value: impl Into<Value>) -> Result<(), ModelError> {
        let value = value.into();
        let mut inner = self.inner();
        if inner.kind != ModelKind::List {
            return Err(ModelError::InvalidMethodContext {
                method: "push",
                kind: inner.kind,
            });
        }
        inner.store.push(value);
        Ok(())
    }

    /// Removes the entry addressed by `key` and closes the gap.
    ///
    /// Later List positions shift down by one; later Hash entries keep their
    /// keys and move down one position in both indexes.
    pub fn delete(&self, key: impl Into<Value>) -> Result<(), ModelError> {
        let address = Address::new(&key.into());
        let mut inner = self.inner();
        let pos = inner.position(&address)?;
        inner.remove_at(pos);
        let remaining = inner.store.len();
        drop(inner);
        tracing::trace!(position = pos, remaining, "Deleted model entry");
        Ok(())
    }

    /// Replaces all data in the Model.
    ///
    /// A List takes a raw sequence ([`Datum::List`]), a Hash takes a raw
    /// string-keyed mapping ([`Datum::Map`]). Indexes are rebuilt from
    /// scratch and the cursor is reset.
    ///
    /// # Errors
    /// [`ModelError::InvalidDataSet`] if the data does not match the kind.
    pub fn set_data(&self, data: impl Into<Value>) -> Result<(), ModelError> {
        let data = data.into();
        let mut inner = self.inner();
        match (inner.kind, data.into_datum()) {
            (ModelKind::List, Datum::List(items)) => inner.replace(Vec::new(), items),
            (ModelKind::Hash, Datum::Map(map)) => {
                let (names, store) = map.into_iter().unzip();
                inner.replace(names, store);
            }
            (kind, other) => {
                return Err(ModelError::InvalidDataSet {
                    expected: match kind {
                        ModelKind::List => "a sequence for a list model".to_string(),
                        ModelKind::Hash => "a mapping for a hash model".to_string(),
                    },
                    found: Value::new(other).type_name().to_string(),
                });
            }
        }
        inner.cursor = BEFORE_FIRST;
        let (kind, entries) = (inner.kind, inner.store.len());
        drop(inner);
        tracing::debug!(%kind, entries, "Replaced model data");
        Ok(())
    }

    /// Returns a snapshot of the backing store and both indexes
    pub fn data(&self) -> ModelData {
        let inner = self.inner();
        ModelData {
            kind: inner.kind,
            store: inner.store.clone(),
            key_to_pos: inner.key_to_pos.clone(),
            pos_to_key: inner.pos_to_key.clone(),
        }
    }

    /// Returns the keys in store order
    pub fn keys(&self) -> Vec<Key> {
        let inner = self.inner();
        (0..inner.store.len()).map(|pos| inner.key_at(pos)).collect()
    }

    /// Returns the values in store order
    pub fn values(&self) -> Vec<Value> {
        self.inner().store.clone()
    }

    /// Returns all `(key, value)` pairs in store order
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.inner().entries()
    }

    /// Merges the entries of `other` into this Model.
    ///
    /// Hash entries are set one by one (existing keys are overwritten, new
    /// keys appended); List elements are pushed. A Model may be merged into
    /// itself.
    ///
    /// # Errors
    /// [`ModelError::InvalidDataSet`] if the kinds differ.
    pub fn merge(&self, other: &Model) -> Result<(), ModelError> {
        let (other_kind, entries) = {
            let theirs = other.inner();
            (theirs.kind, theirs.entries())
        };
        let mut inner = self.inner();
        if inner.kind != other_kind {
            return Err(ModelError::InvalidDataSet {
                expected: format!("a {} model", inner.kind),
                found: format!("a {other_kind} model"),
            });
        }
        let merged = entries.len();
        for (key, value) in entries {
            match key {
                Key::Name(name) => inner.upsert(name, value),
                Key::Index(_) => inner.store.push(value),
            }
        }
        let kind = inner.kind;
        drop(inner);
        tracing::debug!(%kind, merged, "Merged model");
        Ok(())
    }

    /// Reverses the order of the entries
    pub fn reverse(&self) {
        let mut inner = self.inner();
        let mut entries = inner.entries();
        entries.reverse();
        inner.rebuild(entries);
        let (kind, entries) = (inner.kind, inner.store.len());
        drop(inner);
        tracing::debug!(%kind, entries, "Reversed model");
    }

    /// Returns a new Model of the same kind holding the entries for which
    /// `predicate` returns true, in order.
    pub fn filter<F>(&self, mut predicate: F) -> Model
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        let (kind, entries) = self.snapshot();
        let kept = entries
            .into_iter()
            .filter(|(key, value)| predicate(key, value))
            .collect();
        Model::from_entries(kind, kept)
    }

    /// Returns a new Model of the same kind with every value replaced by
    /// `f(key, value)`. Keys and order are unchanged.
    pub fn map_values<F>(&self, mut f: F) -> Model
    where
        F: FnMut(&Key, Value) -> Value,
    {
        let (kind, entries) = self.snapshot();
        let mapped = entries
            .into_iter()
            .map(|(key, value)| {
                let value = f(&key, value);
                (key, value)
            })
            .collect();
        Model::from_entries(kind, mapped)
    }

    /// Copies kind and entries out so callbacks run without the lock held
    fn snapshot(&self) -> (ModelKind, Vec<(Key, Value)>) {
        let inner = self.inner();
        (inner.kind, inner.entries())
    }

    /// Builds a Model from entries taken from a Model of the same kind.
    ///
    /// List entries are renumbered by their new positions.
    fn from_entries(kind: ModelKind, entries: Vec<(Key, Value)>) -> Model {
        let mut inner = Inner::new(kind);
        inner.rebuild(entries);
        Model {
            inner: Mutex::new(inner),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::hash()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // try_lock: Debug may be reached while this Model is already locked
        match self.inner.try_lock() {
            Ok(inner) => f
                .debug_struct("Model")
                .field("kind", &inner.kind)
                .field("id", &inner.id)
                .field("locked", &inner.locked)
                .field("store", &inner.store)
                .field("pos_to_key", &inner.pos_to_key)
                .field("cursor", &inner.cursor)
                .finish(),
            Err(_) => f.write_str("Model { <locked> }"),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner();
        write!(f, "<{} model with {} entries>", inner.kind, inner.store.len())
    }
}
