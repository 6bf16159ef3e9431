//! [`Supplier`] definitions.

use derive_more::{AsRef, Display, From, Into};

/// Company renting its cars out through the platform.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Supplier {
    /// ID of this [`Supplier`].
    pub id: Id,

    /// Full name of this [`Supplier`].
    pub name: String,
}

/// ID of a [`Supplier`], as assigned by the car service.
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
