//! [`Event`]s driving a [`CarList`].

#[cfg(doc)]
use super::CarList;
use super::scroll::Metrics;
use crate::read::car::{filter, list, Filter};

/// Input of a [`CarList`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// User searched by a [`list::Keyword`].
    Search(list::Keyword),

    /// Filter panel reported its initial [`filter::Value`].
    FilterLoaded(filter::Value),

    /// User changed a [`filter::Value`] in a filter panel.
    FilterChanged(filter::Value),

    /// Results region has been scrolled.
    Scrolled(Metrics),
}

/// Kind of a [`filter::Value`] change.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Change {
    /// The query changed, so the list starts over from the first page.
    NewSearch,

    /// The value is the same, so nothing is fetched.
    Reload,
}

impl Change {
    /// Classifies setting the provided [`filter::Value`] on the provided
    /// [`Filter`].
    #[must_use]
    pub fn of(filter: &Filter, value: &filter::Value) -> Self {
        if filter.holds(value) {
            Self::Reload
        } else {
            Self::NewSearch
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Selection;

    use crate::{
        domain::car::{Fuel, Mileage},
        read::car::{
            filter::{Deposit, Value},
            Filter,
        },
    };

    use super::Change;

    #[test]
    fn same_members_in_other_order_is_reload() {
        let filter = Filter::default();

        assert_eq!(
            Change::of(
                &filter,
                &Value::Fuel(Selection::from([Fuel::Gasoline, Fuel::Diesel])),
            ),
            Change::Reload,
        );
        assert_eq!(
            Change::of(&filter, &Value::Deposit(Deposit::Any)),
            Change::Reload,
        );
    }

    #[test]
    fn different_members_is_new_search() {
        let filter = Filter::default();

        assert_eq!(
            Change::of(
                &filter,
                &Value::Mileage(Selection::from([Mileage::Unlimited])),
            ),
            Change::NewSearch,
        );
        assert_eq!(
            Change::of(&filter, &Value::Deposit(Deposit::AtMost7500)),
            Change::NewSearch,
        );
    }
}
