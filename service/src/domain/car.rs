//! [`Car`] definitions.

use common::{define_kind, Money};
use derive_more::{AsRef, Display, From, Into};

use super::supplier;

/// Car available for rent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Car {
    /// ID of this [`Car`].
    pub id: Id,

    /// [`Name`] of this [`Car`].
    pub name: Name,

    /// ID of the [`Supplier`] renting this [`Car`] out.
    ///
    /// [`Supplier`]: super::Supplier
    pub supplier: supplier::Id,

    /// [`Fuel`] this [`Car`] runs on.
    pub fuel: Fuel,

    /// [`Gearbox`] of this [`Car`].
    pub gearbox: Gearbox,

    /// [`Mileage`] allowance of this [`Car`].
    pub mileage: Mileage,

    /// Deposit required to rent this [`Car`].
    pub deposit: Money,

    /// Price of renting this [`Car`] for a day.
    pub daily_price: Money,

    /// [`Availability`] of this [`Car`].
    pub availability: Availability,
}

/// ID of a [`Car`], as assigned by the car service.
#[derive(
    AsRef, Clone, Debug, Display, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[as_ref(forward)]
pub struct Id(String);

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Name of a [`Car`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }

    /// Indicates whether this [`Name`] contains the provided `fragment`,
    /// ignoring case.
    #[must_use]
    pub fn contains_ignore_case(&self, fragment: &str) -> bool {
        self.0.to_lowercase().contains(&fragment.to_lowercase())
    }
}

define_kind! {
    #[doc = "Fuel a [`Car`] runs on."]
    enum Fuel {
        #[doc = "Diesel engine."]
        Diesel = 1,

        #[doc = "Gasoline engine."]
        Gasoline = 2,
    }
}

define_kind! {
    #[doc = "Gearbox of a [`Car`]."]
    enum Gearbox {
        #[doc = "Automatic transmission."]
        Automatic = 1,

        #[doc = "Manual transmission."]
        Manual = 2,
    }
}

define_kind! {
    #[doc = "Mileage allowance of a [`Car`]."]
    enum Mileage {
        #[doc = "Limited number of kilometers per rental."]
        Limited = 1,

        #[doc = "Unlimited kilometers."]
        Unlimited = 2,
    }
}

define_kind! {
    #[doc = "Availability of a [`Car`] for rent."]
    enum Availability {
        #[doc = "Can be rented."]
        Available = 1,

        #[doc = "Withdrawn from rent."]
        Unavailable = 2,
    }
}

impl From<bool> for Availability {
    fn from(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

define_kind! {
    #[doc = "Size range of a [`Car`]."]
    enum Range {
        #[doc = "City cars."]
        Mini = 1,

        #[doc = "Family cars."]
        Midi = 2,

        #[doc = "Vans and large cars."]
        Maxi = 3,

        #[doc = "Two-wheelers."]
        Scooter = 4,
    }
}

#[cfg(test)]
mod spec {
    use super::{Availability, Fuel, Name};

    #[test]
    fn validates_name() {
        assert!(Name::new("Dacia Logan").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" Dacia").is_none());
    }

    #[test]
    fn matches_name_fragment_ignoring_case() {
        let name = Name::new("Peugeot 208").unwrap();

        assert!(name.contains_ignore_case("peug"));
        assert!(name.contains_ignore_case("208"));
        assert!(name.contains_ignore_case(""));
        assert!(!name.contains_ignore_case("clio"));
    }

    #[test]
    fn kinds_round_trip_through_strings() {
        assert_eq!(Fuel::Diesel.to_string(), "DIESEL");
        assert_eq!("GASOLINE".parse::<Fuel>().unwrap(), Fuel::Gasoline);
        assert_eq!(Availability::from(false), Availability::Unavailable);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn kinds_serialize_in_screaming_case() {
        assert_eq!(serde_json::to_string(&Fuel::Diesel).unwrap(), r#""DIESEL""#);
        assert_eq!(
            serde_json::from_str::<Availability>(r#""UNAVAILABLE""#).unwrap(),
            Availability::Unavailable,
        );
    }
}
