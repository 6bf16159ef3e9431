//! [`Car`]-related read definitions.

pub mod filter;

#[cfg(doc)]
use crate::domain::Car;

pub use self::filter::Filter;

pub mod list {
    //! [`Car`] list definitions.

    use common::define_pagination;
    use derive_more::{AsRef, Display};

    use crate::domain::{car, Car};

    use super::Filter;

    define_pagination!(Car, Criteria);

    /// Full specification of a single [`Car`] list request: [`Keyword`],
    /// [`Filter`] and the requested [`Page`].
    pub type Intent = Selector;

    /// Free-text keyword a [`Car`] list is searched by.
    #[derive(AsRef, Clone, Debug, Default, Display, Eq, Hash, PartialEq)]
    #[as_ref(forward)]
    pub struct Keyword(String);

    impl Keyword {
        /// Creates a new [`Keyword`] out of the provided user input.
        ///
        /// Surrounding whitespace is not part of a [`Keyword`].
        #[must_use]
        pub fn new(input: impl AsRef<str>) -> Self {
            Self(input.as_ref().trim().to_owned())
        }

        /// Indicates whether this [`Keyword`] is empty, matching any
        /// [`Car`].
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        /// Indicates whether the provided [`car::Name`] matches this
        /// [`Keyword`].
        #[must_use]
        pub fn matches(&self, name: &car::Name) -> bool {
            name.contains_ignore_case(&self.0)
        }
    }

    /// Search criteria of an [`Intent`].
    #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Criteria {
        /// [`Keyword`] to search by.
        pub keyword: Keyword,

        /// [`Filter`] to narrow the results with.
        pub filter: Filter,
    }

    impl Criteria {
        /// Indicates whether the provided [`Car`] meets these [`Criteria`].
        #[must_use]
        pub fn matches(&self, car: &Car) -> bool {
            self.keyword.matches(&car.name) && self.filter.matches(car)
        }
    }

    /// Builds an [`Intent`] out of the current [`Keyword`] and [`Filter`]
    /// for the page described by the provided [`Arguments`].
    #[must_use]
    pub fn intent(
        keyword: Keyword,
        filter: Filter,
        arguments: Arguments,
    ) -> Intent {
        Selector {
            arguments,
            filter: Criteria { keyword, filter },
        }
    }

    /// Builds an [`Intent`] requesting the page following the one requested
    /// by the provided [`Intent`], with the same [`Criteria`].
    #[must_use]
    pub fn next_page(intent: &Intent) -> Intent {
        Selector {
            arguments: intent.arguments.next(),
            filter: intent.filter.clone(),
        }
    }

}
