//! [`Query`] definition.

pub mod cars;
pub mod suppliers;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{backend, Backend},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Backend`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct BackendQuery<T>(T);

impl<W, B> BackendQuery<By<W, B>> {
    /// Creates a new [`BackendQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Bk, W, B> Query<BackendQuery<By<W, B>>> for Service<Bk>
where
    Bk: Backend<Select<By<W, B>>, Ok = W, Err = Traced<backend::Error>>,
{
    type Ok = W;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        BackendQuery(by): BackendQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, pagination, Money, Selection};
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            car::{self, Availability, Fuel, Gearbox, Mileage},
            supplier, Car, Supplier,
        },
        infra::Memory,
        read::car::{
            filter::{self, Value},
            list,
        },
        Service,
    };

    use super::{cars, suppliers, Query as _};

    fn catalog() -> Memory {
        let cars = (1..=5)
            .map(|n| Car {
                id: car::Id::from(format!("c{n}")),
                name: car::Name::new(format!("Car {n}")).unwrap(),
                supplier: supplier::Id::from("s1"),
                fuel: if n % 2 == 0 { Fuel::Diesel } else { Fuel::Gasoline },
                gearbox: Gearbox::Manual,
                mileage: Mileage::Limited,
                deposit: Money::new(Decimal::from(1000), Currency::Usd),
                daily_price: Money::new(Decimal::from(30), Currency::Usd),
                availability: Availability::Available,
            })
            .collect();
        let suppliers = vec![Supplier {
            id: supplier::Id::from("s1"),
            name: "Avis".to_owned(),
        }];
        Memory::new(cars, suppliers)
    }

    #[tokio::test]
    async fn lists_cars_page() {
        let svc = Service::new(catalog());
        let mut filter = filter::Filter::default();
        filter.set(Value::Suppliers(Selection::from([supplier::Id::from(
            "s1",
        )])));

        let first = list::intent(
            list::Keyword::default(),
            filter,
            list::Arguments::first(pagination::Size::new(2).unwrap()),
        );
        let page = svc
            .execute(cars::List::by(list::next_page(&first)))
            .await
            .unwrap();

        assert_eq!(
            page.items.iter().map(|c| c.id.to_string()).collect::<Vec<_>>(),
            ["c3", "c4"],
        );
        assert_eq!(page.total, Some(5));
    }

    #[tokio::test]
    async fn propagates_backend_failure() {
        let svc = Service::new(catalog());
        svc.backend().set_unavailable(true);

        let res = svc.execute(suppliers::All::by(())).await;

        assert!(res.is_err());
        assert_eq!(svc.backend().requests(), 1);
    }
}
