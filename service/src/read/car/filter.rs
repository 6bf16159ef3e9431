//! [`Filter`] narrowing down a [`Car`] list.

use common::Selection;
use rust_decimal::Decimal;

use crate::domain::{
    car::{Availability, Fuel, Gearbox, Mileage},
    supplier, Car, Supplier,
};

/// Dimension a [`Car`] list can be filtered by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dimension {
    /// [`Supplier`]s renting the cars out.
    Suppliers,

    /// [`Fuel`] the cars run on.
    Fuel,

    /// [`Gearbox`] of the cars.
    Gearbox,

    /// [`Mileage`] allowance of the cars.
    Mileage,

    /// Maximum [`Deposit`] of the cars.
    Deposit,

    /// [`Availability`] of the cars.
    Availability,
}

impl Dimension {
    /// All the [`Dimension`]s, in the order filter panels are laid out.
    pub const ALL: [Self; 6] = [
        Self::Suppliers,
        Self::Fuel,
        Self::Gearbox,
        Self::Mileage,
        Self::Deposit,
        Self::Availability,
    ];

    /// Returns how an empty selection of this [`Dimension`] is treated.
    #[must_use]
    pub const fn empty_policy(self) -> EmptyPolicy {
        match self {
            Self::Suppliers => EmptyPolicy::MatchesNothing,
            Self::Fuel
            | Self::Gearbox
            | Self::Mileage
            | Self::Deposit
            | Self::Availability => EmptyPolicy::Unrestricted,
        }
    }
}

/// Treatment of an empty selection in a [`Dimension`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmptyPolicy {
    /// Nothing selected means no restriction.
    Unrestricted,

    /// Nothing selected means nothing matches.
    MatchesNothing,
}

/// Maximum deposit a [`Car`] may require.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Deposit {
    /// Any deposit.
    #[default]
    Any,

    /// Deposit of 2500 at most.
    AtMost2500,

    /// Deposit of 5000 at most.
    AtMost5000,

    /// Deposit of 7500 at most.
    AtMost7500,
}

impl Deposit {
    /// All the [`Deposit`] thresholds.
    pub const ALL: [Self; 4] =
        [Self::Any, Self::AtMost2500, Self::AtMost5000, Self::AtMost7500];

    /// Returns the upper limit of this [`Deposit`] threshold, if any.
    #[must_use]
    pub fn limit(self) -> Option<Decimal> {
        match self {
            Self::Any => None,
            Self::AtMost2500 => Some(Decimal::from(2500)),
            Self::AtMost5000 => Some(Decimal::from(5000)),
            Self::AtMost7500 => Some(Decimal::from(7500)),
        }
    }

    /// Returns the [`Deposit`] threshold having the provided `limit`.
    #[must_use]
    pub fn from_limit(limit: Option<Decimal>) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.limit() == limit)
    }
}

/// Selected value of a single [`Dimension`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    /// Selected [`Supplier`]s.
    Suppliers(Selection<supplier::Id>),

    /// Selected [`Fuel`]s.
    Fuel(Selection<Fuel>),

    /// Selected [`Gearbox`]es.
    Gearbox(Selection<Gearbox>),

    /// Selected [`Mileage`] allowances.
    Mileage(Selection<Mileage>),

    /// Selected [`Deposit`] threshold.
    Deposit(Deposit),

    /// Selected [`Availability`] states.
    Availability(Selection<Availability>),
}

impl Value {
    /// Returns the [`Dimension`] this [`Value`] belongs to.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::Suppliers(_) => Dimension::Suppliers,
            Self::Fuel(_) => Dimension::Fuel,
            Self::Gearbox(_) => Dimension::Gearbox,
            Self::Mileage(_) => Dimension::Mileage,
            Self::Deposit(_) => Dimension::Deposit,
            Self::Availability(_) => Dimension::Availability,
        }
    }
}

/// Current selection of every [`Dimension`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Filter {
    /// Selected [`Supplier`]s.
    pub suppliers: Selection<supplier::Id>,

    /// Selected [`Fuel`]s.
    pub fuel: Selection<Fuel>,

    /// Selected [`Gearbox`]es.
    pub gearbox: Selection<Gearbox>,

    /// Selected [`Mileage`] allowances.
    pub mileage: Selection<Mileage>,

    /// Selected [`Deposit`] threshold.
    pub deposit: Deposit,

    /// Selected [`Availability`] states.
    pub availability: Selection<Availability>,
}

impl Default for Filter {
    /// Everything selected, except [`Supplier`]s which are unknown until
    /// loaded.
    fn default() -> Self {
        Self {
            suppliers: Selection::empty(),
            fuel: Selection::all(Fuel::ALL),
            gearbox: Selection::all(Gearbox::ALL),
            mileage: Selection::all(Mileage::ALL),
            deposit: Deposit::Any,
            availability: Selection::all(Availability::ALL),
        }
    }
}

impl Filter {
    /// Returns the current [`Value`] of the provided [`Dimension`].
    #[must_use]
    pub fn value(&self, dimension: Dimension) -> Value {
        match dimension {
            Dimension::Suppliers => Value::Suppliers(self.suppliers.clone()),
            Dimension::Fuel => Value::Fuel(self.fuel.clone()),
            Dimension::Gearbox => Value::Gearbox(self.gearbox.clone()),
            Dimension::Mileage => Value::Mileage(self.mileage.clone()),
            Dimension::Deposit => Value::Deposit(self.deposit),
            Dimension::Availability => {
                Value::Availability(self.availability.clone())
            }
        }
    }

    /// Indicates whether the provided [`Value`] equals the current one of
    /// its [`Dimension`].
    ///
    /// Sets are compared by members, so the order values were selected in
    /// doesn't matter.
    #[must_use]
    pub fn holds(&self, value: &Value) -> bool {
        match value {
            Value::Suppliers(v) => &self.suppliers == v,
            Value::Fuel(v) => &self.fuel == v,
            Value::Gearbox(v) => &self.gearbox == v,
            Value::Mileage(v) => &self.mileage == v,
            Value::Deposit(v) => &self.deposit == v,
            Value::Availability(v) => &self.availability == v,
        }
    }

    /// Replaces the current value of the [`Dimension`] of the provided
    /// [`Value`].
    pub fn set(&mut self, value: Value) {
        match value {
            Value::Suppliers(v) => self.suppliers = v,
            Value::Fuel(v) => self.fuel = v,
            Value::Gearbox(v) => self.gearbox = v,
            Value::Mileage(v) => self.mileage = v,
            Value::Deposit(v) => self.deposit = v,
            Value::Availability(v) => self.availability = v,
        }
    }

    /// Indicates whether the provided [`Car`] passes this [`Filter`].
    #[must_use]
    pub fn matches(&self, car: &Car) -> bool {
        admits(&self.suppliers, &car.supplier, Dimension::Suppliers)
            && admits(&self.fuel, &car.fuel, Dimension::Fuel)
            && admits(&self.gearbox, &car.gearbox, Dimension::Gearbox)
            && admits(&self.mileage, &car.mileage, Dimension::Mileage)
            && self
                .deposit
                .limit()
                .map_or(true, |limit| car.deposit.is_at_most(limit))
            && admits(
                &self.availability,
                &car.availability,
                Dimension::Availability,
            )
    }
}

/// Checks the provided `value` against the `selection` of a [`Dimension`].
fn admits<T: Ord>(
    selection: &Selection<T>,
    value: &T,
    dimension: Dimension,
) -> bool {
    if selection.is_empty() {
        dimension.empty_policy() == EmptyPolicy::Unrestricted
    } else {
        selection.contains(value)
    }
}

/// Options the filter panels offer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// All the known [`Supplier`]s.
    pub suppliers: Vec<Supplier>,
}

impl Options {
    /// Returns a [`Selection`] of every known [`Supplier`].
    #[must_use]
    pub fn all_suppliers(&self) -> Selection<supplier::Id> {
        self.suppliers.iter().map(|s| s.id.clone()).collect()
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money, Selection};
    use rust_decimal::Decimal;

    use crate::domain::{
        car::{self, Availability, Fuel, Gearbox, Mileage},
        supplier, Car, Supplier,
    };

    use super::{Deposit, Dimension, Filter, Options, Value};

    fn car(supplier: &str, fuel: Fuel, deposit: u32) -> Car {
        Car {
            id: car::Id::from("c1"),
            name: car::Name::new("Renault Clio").unwrap(),
            supplier: supplier::Id::from(supplier),
            fuel,
            gearbox: Gearbox::Manual,
            mileage: Mileage::Unlimited,
            deposit: Money::new(Decimal::from(deposit), Currency::Usd),
            daily_price: Money::new(Decimal::from(40), Currency::Usd),
            availability: Availability::Available,
        }
    }

    fn with_suppliers(filter: Filter, ids: &[&str]) -> Filter {
        let mut filter = filter;
        filter.set(Value::Suppliers(
            ids.iter().copied().map(supplier::Id::from).collect(),
        ));
        filter
    }

    #[test]
    fn default_selects_every_kind() {
        let filter = Filter::default();

        assert_eq!(filter.fuel.len(), 2);
        assert_eq!(filter.gearbox.len(), 2);
        assert_eq!(filter.mileage.len(), 2);
        assert_eq!(filter.availability.len(), 2);
        assert_eq!(filter.deposit, Deposit::Any);
        assert!(filter.suppliers.is_empty());
    }

    #[test]
    fn empty_suppliers_match_nothing() {
        let filter = Filter::default();

        assert!(!filter.matches(&car("s1", Fuel::Diesel, 1000)));
        assert!(with_suppliers(filter, &["s1"])
            .matches(&car("s1", Fuel::Diesel, 1000)));
    }

    #[test]
    fn empty_kind_selection_is_unrestricted() {
        let mut filter = with_suppliers(Filter::default(), &["s1"]);
        filter.set(Value::Fuel(Selection::empty()));

        assert!(filter.matches(&car("s1", Fuel::Gasoline, 1000)));

        filter.set(Value::Fuel(Selection::from([Fuel::Diesel])));
        assert!(!filter.matches(&car("s1", Fuel::Gasoline, 1000)));
    }

    #[test]
    fn deposit_threshold_is_inclusive() {
        let mut filter = with_suppliers(Filter::default(), &["s1"]);
        filter.set(Value::Deposit(Deposit::AtMost2500));

        assert!(filter.matches(&car("s1", Fuel::Diesel, 2500)));
        assert!(!filter.matches(&car("s1", Fuel::Diesel, 2600)));
        assert_eq!(
            Deposit::from_limit(Some(Decimal::from(5000))),
            Some(Deposit::AtMost5000),
        );
        assert_eq!(Deposit::from_limit(None), Some(Deposit::Any));
        assert_eq!(Deposit::from_limit(Some(Decimal::from(1))), None);
    }

    #[test]
    fn holds_compares_sets_by_members() {
        let filter = Filter::default();

        assert!(filter.holds(&Value::Gearbox(Selection::from([
            Gearbox::Manual,
            Gearbox::Automatic,
        ]))));
        assert!(!filter.holds(&Value::Gearbox(Selection::from([
            Gearbox::Manual
        ]))));
        for dimension in Dimension::ALL {
            assert!(filter.holds(&filter.value(dimension)));
            assert_eq!(filter.value(dimension).dimension(), dimension);
        }
    }

    #[test]
    fn flattens_all_suppliers() {
        let options = Options {
            suppliers: vec![
                Supplier {
                    id: "b".into(),
                    name: "Budget".to_owned(),
                },
                Supplier {
                    id: "a".into(),
                    name: "Avis".to_owned(),
                },
            ],
        };

        assert_eq!(
            options.all_suppliers(),
            Selection::from([supplier::Id::from("a"), supplier::Id::from("b")]),
        );
    }
}
