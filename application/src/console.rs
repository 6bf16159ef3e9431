//! [`Console`] rendering a car list into the terminal.

use std::io;

use service::{controller::ScrollRegion, domain::Car, CarList};

/// Terminal region a car list is printed into.
///
/// Prints the displayed cars incrementally, starting over once scrolled to
/// the top.
#[derive(Debug)]
pub struct Console<W> {
    /// Output the cars are printed into.
    out: W,

    /// Number of the displayed cars already printed.
    printed: usize,

    /// Indicator whether the list has been scrolled to the top since the
    /// last print.
    at_top: bool,
}

impl<W> Console<W> {
    /// Creates a new [`Console`] printing into the provided output.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            printed: 0,
            at_top: false,
        }
    }

    /// Returns the output of this [`Console`].
    #[must_use]
    pub fn out(&self) -> &W {
        &self.out
    }
}

impl<W> ScrollRegion for Console<W> {
    fn scroll_to_top(&mut self) {
        self.printed = 0;
        self.at_top = true;
    }
}

impl<W: io::Write> Console<W> {
    /// Prints the cars of the provided [`CarList`] not printed yet, followed
    /// by its status.
    ///
    /// # Errors
    ///
    /// If failed to write into the output.
    pub fn render(list: &mut CarList<Self>) -> io::Result<()> {
        let cars = list.cars().to_vec();
        let status = status(list);
        let this = list.region_mut();

        if this.at_top {
            writeln!(this.out, "---")?;
            this.at_top = false;
        }
        // The list shrinks only by replacing it from the top.
        let fresh = cars.get(this.printed..).unwrap_or_default();
        for car in fresh {
            writeln!(this.out, "{}", line(car))?;
        }
        this.printed = cars.len();
        writeln!(this.out, "{status}")?;
        this.out.flush()
    }

    /// Prints every displayed car of the provided [`CarList`] again.
    ///
    /// # Errors
    ///
    /// If failed to write into the output.
    pub fn reprint(list: &mut CarList<Self>) -> io::Result<()> {
        list.region_mut().scroll_to_top();
        Self::render(list)
    }
}

/// Formats a single [`Car`] row.
fn line(car: &Car) -> String {
    let Car {
        id,
        name,
        supplier,
        fuel,
        gearbox,
        mileage,
        deposit,
        daily_price,
        availability,
    } = car;
    format!(
        "{name} [{id}] by {supplier}: {fuel}, {gearbox}, {mileage} mileage, \
         deposit {deposit}, {daily_price}/day, {availability}",
    )
}

/// Formats the status line of a [`CarList`].
fn status<R>(list: &CarList<R>) -> String {
    let shown = list.cars().len();
    let total = list
        .row_count()
        .map_or_else(|| "?".to_owned(), |n| n.to_string());
    let more = if list.is_loading() {
        ", loading..."
    } else if list.has_more() {
        ", scroll for more"
    } else {
        ""
    };
    format!("{shown} of {total} cars{more}")
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, pagination::Size, Money, Selection};
    use service::{
        controller::{self, Event, FetchOffset, Metrics},
        domain::{
            car::{self, Availability, Fuel, Gearbox, Mileage},
            supplier, Car, Supplier,
        },
        infra::Memory,
        read::car::filter::Value,
        CarList, Service,
    };

    use super::Console;

    fn service() -> Service<Memory> {
        let cars = (1..=3)
            .map(|n| Car {
                id: car::Id::from(format!("c{n}")),
                name: car::Name::new(format!("Dacia Logan {n}")).unwrap(),
                supplier: supplier::Id::from("s1"),
                fuel: Fuel::Diesel,
                gearbox: Gearbox::Manual,
                mileage: Mileage::Limited,
                deposit: Money::new(2500.into(), Currency::Mad),
                daily_price: Money::new(300.into(), Currency::Mad),
                availability: Availability::Available,
            })
            .collect();
        Service::new(Memory::new(
            cars,
            vec![Supplier {
                id: supplier::Id::from("s1"),
                name: "Avis".to_owned(),
            }],
        ))
    }

    fn output(list: &CarList<Console<Vec<u8>>>) -> String {
        String::from_utf8(list.region().out().clone()).unwrap()
    }

    #[tokio::test]
    async fn prints_only_new_cars() {
        let svc = service();
        let mut list = CarList::new(
            controller::Config {
                page_size: Size::new(2).unwrap(),
                fetch_offset: FetchOffset::from(10.0),
            },
            Console::new(Vec::new()),
        );

        let fetch = list
            .handle(Event::FilterLoaded(Value::Suppliers(Selection::from([
                supplier::Id::from("s1"),
            ]))))
            .unwrap();
        _ = list.complete(fetch.run(&svc).await);
        Console::render(&mut list).unwrap();

        let fetch = list
            .handle(Event::Scrolled(Metrics {
                scroll_top: 0.0,
                scroll_height: 10.0,
                viewport_height: 10.0,
            }))
            .unwrap();
        _ = list.complete(fetch.run(&svc).await);
        Console::render(&mut list).unwrap();

        let out = output(&list);
        assert_eq!(out.matches("Dacia Logan 1").count(), 1);
        assert_eq!(out.matches("Dacia Logan 3").count(), 1);
        assert!(out.starts_with("---\n"));
        assert!(out.contains(
            "Dacia Logan 2 [c2] by s1: DIESEL, MANUAL, LIMITED mileage, \
             deposit 2500MAD, 300MAD/day, AVAILABLE",
        ));
        assert!(out.contains("2 of 3 cars, scroll for more"));
        assert!(out.ends_with("3 of 3 cars\n"));

        Console::reprint(&mut list).unwrap();
        assert_eq!(output(&list).matches("Dacia Logan 1").count(), 2);
    }
}
