//! Domain definitions.

pub mod car;
pub mod location;
pub mod supplier;

pub use self::{car::Car, location::Location, supplier::Supplier};
