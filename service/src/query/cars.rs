//! [`Query`] collection related to multiple [`Car`]s.

use common::operations::By;

use crate::read::car::list;
#[cfg(doc)]
use crate::{domain::Car, Query};

use super::BackendQuery;

/// Queries a [`list::Page`] of [`Car`]s described by a [`list::Intent`].
pub type List = BackendQuery<By<list::Page, list::Intent>>;
