//! [`Selection`] of values out of a known set.

use std::collections::{btree_set, BTreeSet};

/// Unordered set of selected values.
///
/// Two [`Selection`]s are equal whenever they contain the same members,
/// regardless of the order the members were selected in.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Selection<T: Ord>(BTreeSet<T>);

impl<T: Ord> Selection<T> {
    /// Creates a new empty [`Selection`].
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Indicates whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns number of selected values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the provided `value` is selected.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    /// Iterates over the selected values in their natural order.
    pub fn iter(&self) -> btree_set::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: Copy + Ord> Selection<T> {
    /// Creates a new [`Selection`] having every value of the provided `all`
    /// slice selected.
    #[must_use]
    pub fn all(all: &[T]) -> Self {
        all.iter().copied().collect()
    }
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Ord> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Selection<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Ord> IntoIterator for Selection<T> {
    type Item = T;
    type IntoIter = btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a Selection<T> {
    type Item = &'a T;
    type IntoIter = btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod spec {
    use super::Selection;

    #[test]
    fn equality_ignores_order_and_duplicates() {
        let a = Selection::from(["diesel", "gasoline"]);
        let b = Selection::from(["gasoline", "diesel", "gasoline"]);

        assert_eq!(a, b);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn differs_by_cardinality_or_members() {
        let a = Selection::from([1, 2]);

        assert_ne!(a, Selection::from([1]));
        assert_ne!(a, Selection::from([1, 3]));
        assert_ne!(a, Selection::empty());
    }

    #[test]
    fn selects_all() {
        let all = Selection::all(&[3, 1, 2]);

        assert_eq!(all.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(all.contains(&2));
        assert!(!all.is_empty());
    }
}
