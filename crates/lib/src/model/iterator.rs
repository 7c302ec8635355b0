//! Cursor-based iteration over Models.
//!
//! Every Model carries one shared cursor, driven by [`Model::next`],
//! [`Model::prev`], [`Model::cur`], [`Model::reset`] and [`Model::seek`]. The
//! shared cursor is not re-entrant: two callers iterating the same Model
//! through it interleave. [`Model::cursor`] hands out independent [`Cursor`]s
//! with identical semantics, each holding its own position.
//!
//! Both follow the same protocol:
//! - the cursor starts before the first entry;
//! - `next` advances, and stepping past the last entry resets the cursor to
//!   before the first entry and reports the end, so the following `next`
//!   starts over;
//! - `prev` steps back, and stepping before the first entry reports the end
//!   without wrapping around;
//! - `cur` reads the entry under the cursor without moving.
//!
//! ```
//! use duomodel::{Key, Model};
//!
//! let model = Model::list();
//! model.push("one").unwrap();
//! model.push("two").unwrap();
//!
//! let mut seen = Vec::new();
//! while let Some((key, value)) = model.next() {
//!     seen.push((key, value.to_text().unwrap()));
//! }
//! assert_eq!(
//!     seen,
//!     vec![(Key::Index(0), String::from("one")), (Key::Index(1), String::from("two"))]
//! );
//! ```

use super::{Address, BEFORE_FIRST, Inner, Key, Model, ModelError};
use crate::value::Value;

/// Advances `pos`; past the end it resets to [`BEFORE_FIRST`]
fn step_next(inner: &Inner, pos: &mut isize) -> Option<(Key, Value)> {
    *pos += 1;
    let entry = inner.entry_at(*pos);
    if entry.is_none() {
        *pos = BEFORE_FIRST;
    }
    entry
}

/// Moves `pos` back; it never goes below [`BEFORE_FIRST`]
fn step_prev(inner: &Inner, pos: &mut isize) -> Option<(Key, Value)> {
    let len = inner.store.len() as isize;
    let target = (*pos).min(len) - 1;
    if target < 0 {
        *pos = BEFORE_FIRST;
        return None;
    }
    *pos = target;
    inner.entry_at(target)
}

/// Places `pos` one before the entry addressed by `address`
fn seek_to(inner: &Inner, pos: &mut isize, address: &Address) -> Result<(), ModelError> {
    let target = inner.position(address)?;
    *pos = target as isize - 1;
    Ok(())
}

impl Model {
    /// Advances the shared cursor and returns the entry under it.
    ///
    /// Returns `None` once the cursor moves past the last entry, and resets
    /// the cursor so the next call starts from the first entry again.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Option<(Key, Value)> {
        let mut inner = self.inner();
        let mut pos = inner.cursor;
        let entry = step_next(&inner, &mut pos);
        inner.cursor = pos;
        entry
    }

    /// Moves the shared cursor back and returns the entry under it.
    ///
    /// Returns `None` when moving before the first entry; unlike
    /// [`Model::next`] this does not wrap around.
    pub fn prev(&self) -> Option<(Key, Value)> {
        let mut inner = self.inner();
        let mut pos = inner.cursor;
        let entry = step_prev(&inner, &mut pos);
        inner.cursor = pos;
        entry
    }

    /// Returns the entry under the shared cursor without moving it.
    ///
    /// Returns `None` before iteration has begun, including after
    /// [`Model::reset`].
    pub fn cur(&self) -> Option<(Key, Value)> {
        let inner = self.inner();
        inner.entry_at(inner.cursor)
    }

    /// Moves the shared cursor before the first entry
    pub fn reset(&self) {
        self.inner().cursor = BEFORE_FIRST;
    }

    /// Positions the shared cursor so the following [`Model::next`] returns
    /// the entry addressed by `key`.
    ///
    /// # Errors
    /// - [`ModelError::InvalidIndex`] if the key is absent or out of range
    /// - [`ModelError::InvalidIndexType`] for a non-integer key on a List
    pub fn seek(&self, key: impl Into<Value>) -> Result<(), ModelError> {
        let address = Address::new(&key.into());
        let mut inner = self.inner();
        let mut pos = inner.cursor;
        seek_to(&inner, &mut pos, &address)?;
        inner.cursor = pos;
        Ok(())
    }

    /// Returns an independent cursor over this Model.
    ///
    /// The cursor borrows the Model and keeps its own position; it does not
    /// touch the shared cursor. The Model is locked only for each step, so it
    /// can be modified between steps.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            model: self,
            pos: BEFORE_FIRST,
        }
    }

    /// Returns an independent cursor positioned before the first entry
    pub fn iter(&self) -> Cursor<'_> {
        self.cursor()
    }
}

/// An independent cursor over a [`Model`].
///
/// `Cursor` implements [`Iterator`]. Like [`Model::next`], exhausting it
/// resets its position, so calling `next` again after `None` starts a new
/// traversal.
///
/// ```
/// use duomodel::Model;
///
/// let model = Model::hash();
/// model.set("b", 1).unwrap();
/// model.set("a", 2).unwrap();
///
/// let mut first = model.cursor();
/// let mut second = model.cursor();
/// assert_eq!(first.next().unwrap().0.to_string(), "b");
/// assert_eq!(first.next().unwrap().0.to_string(), "a");
/// assert_eq!(second.next().unwrap().0.to_string(), "b");
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    model: &'a Model,
    pos: isize,
}

impl<'a> Cursor<'a> {
    /// Returns the Model this cursor walks
    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// Moves back one entry; see [`Model::prev`]
    pub fn prev(&mut self) -> Option<(Key, Value)> {
        let inner = self.model.inner();
        step_prev(&inner, &mut self.pos)
    }

    /// Returns the entry under the cursor; see [`Model::cur`]
    pub fn cur(&self) -> Option<(Key, Value)> {
        self.model.inner().entry_at(self.pos)
    }

    /// Moves the cursor before the first entry
    pub fn reset(&mut self) {
        self.pos = BEFORE_FIRST;
    }

    /// Positions the cursor before the entry addressed by `key`; see
    /// [`Model::seek`]
    pub fn seek(&mut self, key: impl Into<Value>) -> Result<(), ModelError> {
        let address = Address::new(&key.into());
        let inner = self.model.inner();
        seek_to(&inner, &mut self.pos, &address)
    }
}

impl Iterator for Cursor<'_> {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.model.inner();
        step_next(&inner, &mut self.pos)
    }
}

impl<'a> IntoIterator for &'a Model {
    type Item = (Key, Value);
    type IntoIter = Cursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}
