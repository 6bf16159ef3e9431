//! Pickup [`Location`] definitions.

use derive_more::{Display, From, Into};
use uuid::Uuid;

/// Place where a car is picked up.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    /// ID of this [`Location`].
    pub id: Id,

    /// Human-readable name of this [`Location`].
    pub name: String,

    /// [`Coordinates`] of this [`Location`].
    pub coordinates: Coordinates,
}

/// ID of a [`Location`].
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Geographic coordinates in decimal degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinates {
    /// Latitude, positive to the north.
    pub latitude: f64,

    /// Longitude, positive to the east.
    pub longitude: f64,
}
