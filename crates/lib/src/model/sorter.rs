//! Reordering of a Model's backing store.

use super::{Model, ModelKind};

/// How [`Model::sort`] should order entries.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortFlag {
    /// Order Hash entries by their normalized keys, byte-wise
    ByKey,
}

impl Model {
    /// Sorts the Model in place.
    ///
    /// [`SortFlag::ByKey`] orders a Hash by its normalized keys and renumbers
    /// the store and both indexes from zero. List contents have no defined key
    /// order, so sorting a List is a no-op. Flags that mean nothing for the
    /// Model's kind are ignored rather than reported as errors.
    ///
    /// ```
    /// use duomodel::{Model, SortFlag};
    ///
    /// let model = Model::hash();
    /// model.set("b", 1).unwrap();
    /// model.set("a", 2).unwrap();
    /// model.sort(SortFlag::ByKey);
    /// assert_eq!(model.next().unwrap().0.to_string(), "a");
    /// ```
    pub fn sort(&self, flag: SortFlag) {
        let mut inner = self.inner();
        match (flag, inner.kind) {
            (SortFlag::ByKey, ModelKind::Hash) => {
                let mut entries = inner.entries();
                // Key::Name compares its strings byte-wise
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                inner.rebuild(entries);
                let entries = inner.store.len();
                drop(inner);
                tracing::debug!(entries, "Sorted hash model by key");
            }
            (SortFlag::ByKey, ModelKind::List) => {}
        }
    }
}
