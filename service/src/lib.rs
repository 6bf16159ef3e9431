//! Service contains the car listing logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod controller;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod search;

#[cfg(test)]
use wiremock as _;

#[cfg(doc)]
use infra::Backend;

pub use self::{
    controller::CarList, infra::backend::Error as BackendError, query::Query,
};

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Bk> {
    /// [`Backend`] of this [`Service`].
    backend: Bk,
}

impl<Bk> Service<Bk> {
    /// Creates a new [`Service`] on top of the provided [`Backend`].
    #[must_use]
    pub fn new(backend: Bk) -> Self {
        Self { backend }
    }

    /// Returns [`Backend`] of this [`Service`].
    #[must_use]
    pub fn backend(&self) -> &Bk {
        &self.backend
    }
}
