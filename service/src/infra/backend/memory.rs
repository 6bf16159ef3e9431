//! In-memory [`Backend`] implementation.

use std::{cell::Cell, rc::Rc};

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    domain::{Car, Supplier},
    infra::backend,
    read::car::{filter, list},
};
#[cfg(doc)]
use crate::infra::Backend;

/// [`Backend`] serving a fixed catalog of [`Car`]s from memory.
///
/// Clones share the same catalog.
#[derive(Clone, Debug, Default)]
pub struct Memory(Rc<Catalog>);

/// Catalog of a [`Memory`] backend.
#[derive(Debug, Default)]
struct Catalog {
    /// [`Car`]s of this [`Catalog`], in listing order.
    cars: Vec<Car>,

    /// [`Supplier`]s of this [`Catalog`].
    suppliers: Vec<Supplier>,

    /// Indicator whether requests should fail.
    unavailable: Cell<bool>,

    /// Number of requests received so far.
    requests: Cell<usize>,
}

impl Memory {
    /// Creates a new [`Memory`] backend serving the provided [`Car`]s and
    /// [`Supplier`]s.
    #[must_use]
    pub fn new(cars: Vec<Car>, suppliers: Vec<Supplier>) -> Self {
        Self(Rc::new(Catalog {
            cars,
            suppliers,
            unavailable: Cell::new(false),
            requests: Cell::new(0),
        }))
    }

    /// Makes all further requests fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.0.unavailable.set(unavailable);
    }

    /// Returns number of requests received so far.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.0.requests.get()
    }

    /// Accounts a new request, failing if this [`Memory`] is unavailable.
    fn receive(&self) -> Result<(), Traced<backend::Error>> {
        self.0.requests.set(self.0.requests.get() + 1);
        if self.0.unavailable.get() {
            return Err(tracerr::new!(backend::Error::from(Error)));
        }
        Ok(())
    }
}

impl backend::Backend<Select<By<list::Page, list::Intent>>> for Memory {
    type Ok = list::Page;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Intent>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.receive()?;

        let list::Intent {
            arguments,
            filter: criteria,
        } = by.into_inner();

        let matching =
            self.0.cars.iter().filter(|car| criteria.matches(car));
        let total = matching.clone().count();
        let items = matching
            .skip(arguments.offset())
            .take(arguments.size.get())
            .cloned();

        Ok(list::Page::new(items, Some(total)))
    }
}

impl backend::Backend<Select<By<filter::Options, ()>>> for Memory {
    type Ok = filter::Options;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<filter::Options, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.receive()?;

        Ok(filter::Options {
            suppliers: self.0.suppliers.clone(),
        })
    }
}

/// [`Memory`] backend error.
#[derive(Clone, Copy, Debug, Display, StdError)]
#[display("in-memory catalog is unavailable")]
pub struct Error;
