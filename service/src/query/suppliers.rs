//! [`Query`] collection related to multiple [`Supplier`]s.

use common::operations::By;

use crate::read::car::filter;
#[cfg(doc)]
use crate::{domain::Supplier, Query};

use super::BackendQuery;

/// Queries the [`filter::Options`] offering every known [`Supplier`].
pub type All = BackendQuery<By<filter::Options, ()>>;
