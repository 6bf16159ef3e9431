//! Abstractions for page-number pagination.

use std::num::NonZeroUsize;

use derive_more::{Display, Into};

/// One-based number of a [`Page`].
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Number(NonZeroUsize);

impl Number {
    /// Number of the first [`Page`].
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Creates a new [`Number`] if the provided `number` is positive.
    #[must_use]
    pub fn new(number: usize) -> Option<Self> {
        NonZeroUsize::new(number).map(Self)
    }

    /// Returns the [`Number`] of the page following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Indicates whether this [`Number`] points to the first [`Page`].
    #[must_use]
    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    /// Returns the raw value of this [`Number`].
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Maximum number of items in a [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
pub struct Size(NonZeroUsize);

impl Size {
    /// Creates a new [`Size`] if the provided `size` is positive.
    #[must_use]
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// Returns the raw value of this [`Size`].
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// [`Number`] of the requested [`Page`].
    pub number: Number,

    /// [`Size`] of the requested [`Page`].
    pub size: Size,
}

impl Arguments {
    /// Creates new [`Arguments`] requesting the first [`Page`] of the
    /// provided [`Size`].
    #[must_use]
    pub fn first(size: Size) -> Self {
        Self {
            number: Number::FIRST,
            size,
        }
    }

    /// Returns [`Arguments`] requesting the [`Page`] following the one
    /// requested by these [`Arguments`].
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            number: self.number.next(),
            size: self.size,
        }
    }

    /// Returns number of items to skip before the requested [`Page`].
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.number.get() - 1).saturating_mul(self.size.get())
    }
}

/// A page of items.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<I> {
    /// Items of this [`Page`], in order.
    pub items: Vec<I>,

    /// Total number of items matching the request across all pages, if
    /// reported.
    pub total: Option<usize>,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] out of the provided `items`.
    #[must_use]
    pub fn new(
        items: impl IntoIterator<Item = I>,
        total: Option<usize>,
    ) -> Self {
        Self {
            items: items.into_iter().collect(),
            total,
        }
    }

    /// Indicates whether more items are likely available after this [`Page`].
    ///
    /// Only a full-sized [`Page`] promises more. An empty or a partial one
    /// terminates the pagination.
    #[must_use]
    pub fn has_more(&self, size: Size) -> bool {
        self.items.len() >= size.get()
    }
}

/// Pagination selector.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}
