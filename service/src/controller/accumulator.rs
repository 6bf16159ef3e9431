//! [`Accumulator`] of fetched pages.

use common::pagination::{Number, Page, Size};

/// Displayed list built out of consecutively fetched [`Page`]s.
#[derive(Clone, Debug)]
pub struct Accumulator<T> {
    /// Items being displayed, in order.
    items: Vec<T>,

    /// Indicator whether more [`Page`]s are likely available.
    has_more: bool,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
        }
    }
}

/// Way a [`Page`] has been merged into an [`Accumulator`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Merge {
    /// The first [`Page`] replaced the whole list.
    Replaced,

    /// A following [`Page`] was appended to the list.
    Appended,
}

impl<T> Accumulator<T> {
    /// Merges the provided [`Page`] fetched with the provided [`Number`] and
    /// [`Size`] into this [`Accumulator`].
    ///
    /// The first [`Page`] replaces the list, any other one extends it.
    pub fn merge(&mut self, number: Number, page: Page<T>, size: Size) -> Merge {
        self.has_more = page.has_more(size);
        if number.is_first() {
            self.items = page.items;
            Merge::Replaced
        } else {
            self.items.extend(page.items);
            Merge::Appended
        }
    }

    /// Empties this [`Accumulator`].
    pub fn clear(&mut self) {
        self.items.clear();
        self.has_more = false;
    }

    /// Returns the accumulated items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Indicates whether more [`Page`]s are likely available.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }
}
