//! REST [`Backend`] implementation talking to the remote car service.

use std::time;

use common::{
    money::Currency,
    operations::{By, Select},
    Money,
};
use derive_more::{Display, Error as StdError, From};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::{Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{
    domain::{car, supplier, Car, Supplier},
    infra::backend,
    read::car::{filter, list},
};
#[cfg(doc)]
use crate::infra::Backend;

/// [`Http`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base [`Url`] of the car service API.
    pub url: Url,

    /// Timeout of a single request.
    pub timeout: time::Duration,

    /// [`Currency`] amounts are reported in.
    pub currency: Currency,
}

/// [`Backend`] of the remote car service.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base [`Url`] the API paths are joined to.
    base: Url,

    /// [`Currency`] amounts are reported in.
    currency: Currency,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the underlying HTTP client.
    pub fn new(conf: &Config) -> Result<Self, Traced<backend::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        let mut base = conf.url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            base,
            currency: conf.currency,
        })
    }

    /// Resolves the provided API `path` against the base [`Url`].
    fn endpoint(&self, path: &str) -> Result<Url, Traced<backend::Error>> {
        self.base
            .join(path)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))
    }
}

impl backend::Backend<Select<By<list::Page, list::Intent>>> for Http {
    type Ok = list::Page;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Intent>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Intent {
            arguments,
            filter: list::Criteria { keyword, filter },
        } = by.into_inner();

        let mut url = self.endpoint(&format!(
            "api/cars/{}/{}",
            arguments.number, arguments.size,
        ))?;
        _ = url.query_pairs_mut().append_pair("s", keyword.as_ref());

        log::debug!("POST {url}");

        let response: Vec<CarsResponse> = self
            .client
            .post(url)
            .json(&CarsPayload::from(&filter))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        let Some(CarsResponse { cars, page_info }) =
            response.into_iter().next()
        else {
            return Ok(list::Page::new(Vec::new(), Some(0)));
        };
        let total = page_info.first().map(|info| info.total_records);
        let cars = cars
            .into_iter()
            .map(|dto| dto.into_car(self.currency))
            .collect::<Result<Vec<_>, _>>()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        Ok(list::Page::new(cars, total))
    }
}

impl backend::Backend<Select<By<filter::Options, ()>>> for Http {
    type Ok = filter::Options;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<filter::Options, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint("api/all-suppliers")?;

        log::debug!("GET {url}");

        let suppliers: Vec<SupplierDto> = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        Ok(filter::Options {
            suppliers: suppliers.into_iter().map(Into::into).collect(),
        })
    }
}

/// [`Http`] backend error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to resolve an endpoint [`Url`].
    #[display("invalid endpoint URL: {_0}")]
    Url(url::ParseError),

    /// Request failed, timed out, or returned a non-success status.
    #[display("request failed: {_0}")]
    Request(reqwest::Error),

    /// Response contained a value not fitting the domain.
    #[display("unexpected response: {_0}")]
    Decode(#[error(not(source))] DecodeError),
}

/// Description of an unexpected value in a response.
#[derive(Clone, Debug, Display)]
#[display("`{field}` has unexpected value `{value}`")]
pub struct DecodeError {
    /// Name of the field holding the value.
    field: &'static str,

    /// The unexpected value.
    value: String,
}

/// Body of a car list request.
#[derive(Debug, Serialize)]
struct CarsPayload {
    /// IDs of the selected [`Supplier`]s.
    suppliers: Vec<String>,

    /// Selected fuels.
    fuel: Vec<String>,

    /// Selected gearboxes.
    gearbox: Vec<String>,

    /// Selected mileage allowances.
    mileage: Vec<String>,

    /// Maximum deposit, `-1` for any.
    deposit: i64,

    /// Selected availability states.
    availability: Vec<String>,
}

impl From<&filter::Filter> for CarsPayload {
    fn from(filter: &filter::Filter) -> Self {
        Self {
            suppliers: filter.suppliers.iter().map(ToString::to_string).collect(),
            fuel: wire_values(&filter.fuel),
            gearbox: wire_values(&filter.gearbox),
            mileage: wire_values(&filter.mileage),
            deposit: filter
                .deposit
                .limit()
                .and_then(|limit| limit.to_i64())
                .unwrap_or(-1),
            availability: wire_values(&filter.availability),
        }
    }
}

/// Converts the selected kinds into their lowercase wire representation.
fn wire_values<T>(selection: &common::Selection<T>) -> Vec<String>
where
    T: Ord + ToString,
{
    selection.iter().map(|v| v.to_string().to_lowercase()).collect()
}

/// Parses a kind out of its lowercase wire representation.
fn parse_wire<T: std::str::FromStr>(
    field: &'static str,
    value: String,
) -> Result<T, DecodeError> {
    value
        .to_uppercase()
        .parse()
        .map_err(|_| DecodeError { field, value })
}

/// Single element of a car list response.
#[derive(Debug, Deserialize)]
struct CarsResponse {
    /// [`Car`]s of the requested page.
    #[serde(rename = "resultData", default)]
    cars: Vec<CarDto>,

    /// Information about the whole result set.
    #[serde(rename = "pageInfo", default)]
    page_info: Vec<PageInfoDto>,
}

/// Information about a whole car list result set.
#[derive(Clone, Copy, Debug, Deserialize)]
struct PageInfoDto {
    /// Total number of matching [`Car`]s.
    #[serde(rename = "totalRecords")]
    total_records: usize,
}

/// [`Car`] as represented by the car service.
#[derive(Debug, Deserialize)]
struct CarDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    supplier: SupplierDto,
    #[serde(rename = "type")]
    fuel: String,
    gearbox: String,
    mileage: i64,
    deposit: Decimal,
    #[serde(rename = "dailyPrice")]
    daily_price: Decimal,
    available: bool,
}

impl CarDto {
    /// Converts this [`CarDto`] into a [`Car`] priced in the provided
    /// [`Currency`].
    fn into_car(self, currency: Currency) -> Result<Car, DecodeError> {
        let Self {
            id,
            name,
            supplier,
            fuel,
            gearbox,
            mileage,
            deposit,
            daily_price,
            available,
        } = self;

        Ok(Car {
            id: id.into(),
            name: car::Name::new(name.trim()).ok_or(DecodeError {
                field: "name",
                value: name,
            })?,
            supplier: supplier.id.into(),
            fuel: parse_wire("type", fuel)?,
            gearbox: parse_wire("gearbox", gearbox)?,
            mileage: if mileage < 0 {
                car::Mileage::Unlimited
            } else {
                car::Mileage::Limited
            },
            deposit: Money::new(deposit, currency),
            daily_price: Money::new(daily_price, currency),
            availability: available.into(),
        })
    }
}

/// [`Supplier`] as represented by the car service.
#[derive(Debug, Deserialize)]
struct SupplierDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "fullName", default)]
    full_name: String,
}

impl From<SupplierDto> for Supplier {
    fn from(dto: SupplierDto) -> Self {
        Self {
            id: supplier::Id::from(dto.id),
            name: dto.full_name,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{money::Currency, operations::By, pagination, Selection};
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, body_partial_json, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{
        domain::{
            car::{Availability, Fuel, Mileage},
            supplier,
        },
        infra::{backend::Backend as _, Http},
        read::car::{
            filter::{self, Deposit, Value},
            list,
        },
    };

    use super::{Config, Select};

    fn client(server: &MockServer) -> Http {
        client_with_timeout(server, Duration::from_secs(5))
    }

    fn client_with_timeout(server: &MockServer, timeout: Duration) -> Http {
        Http::new(&Config {
            url: server.uri().parse().unwrap(),
            timeout,
            currency: Currency::Eur,
        })
        .unwrap()
    }

    fn intent(keyword: &str, filter: filter::Filter, page: usize) -> list::Intent {
        list::intent(
            list::Keyword::new(keyword),
            filter,
            list::Arguments {
                number: pagination::Number::new(page).unwrap(),
                size: pagination::Size::new(2).unwrap(),
            },
        )
    }

    #[tokio::test]
    async fn posts_filter_and_decodes_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cars/2/2"))
            .and(query_param("s", "clio"))
            .and(body_json(json!({
                "suppliers": ["s1"],
                "fuel": ["diesel"],
                "gearbox": ["automatic", "manual"],
                "mileage": ["limited", "unlimited"],
                "deposit": 5000,
                "availability": ["available", "unavailable"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "resultData": [{
                    "_id": "c3",
                    "name": "Renault Clio",
                    "supplier": { "_id": "s1", "fullName": "Avis" },
                    "type": "diesel",
                    "gearbox": "manual",
                    "mileage": -1,
                    "deposit": 2500,
                    "dailyPrice": 39.5,
                    "available": false,
                }],
                "pageInfo": [{ "totalRecords": 3 }],
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let mut filter = filter::Filter::default();
        filter.set(Value::Suppliers(Selection::from([supplier::Id::from(
            "s1",
        )])));
        filter.set(Value::Fuel(Selection::from([Fuel::Diesel])));
        filter.set(Value::Deposit(Deposit::AtMost5000));

        let page = client(&server)
            .execute(Select(By::new(intent("clio", filter, 2))))
            .await
            .unwrap();

        assert_eq!(page.total, Some(3));
        assert_eq!(page.items.len(), 1);
        let car = &page.items[0];
        assert_eq!(car.id.to_string(), "c3");
        assert_eq!(car.fuel, Fuel::Diesel);
        assert_eq!(car.mileage, Mileage::Unlimited);
        assert_eq!(car.availability, Availability::Unavailable);
        assert_eq!(car.daily_price.to_string(), "39.5EUR");
    }

    #[tokio::test]
    async fn empty_response_is_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cars/1/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let page = client(&server)
            .execute(Select(By::new(intent("", filter::Filter::default(), 1))))
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, Some(0));
    }

    #[tokio::test]
    async fn sends_any_deposit_as_negative() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cars/1/2"))
            .and(body_partial_json(json!({ "deposit": -1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut filter = filter::Filter::default();
        filter.set(Value::Deposit(Deposit::AtMost2500));
        filter.set(Value::Deposit(Deposit::Any));

        let page = client(&server)
            .execute(Select(By::new(intent("", filter, 1))))
            .await
            .unwrap();

        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = client_with_timeout(&server, Duration::from_millis(100))
            .execute(Select(By::new(intent("", filter::Filter::default(), 1))))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("request failed"), "{err}");
    }

    #[tokio::test]
    async fn error_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let res = client(&server)
            .execute(Select(By::new(intent("", filter::Filter::default(), 1))))
            .await;

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn unknown_kind_fails_decoding() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "resultData": [{
                    "_id": "c1",
                    "name": "Tesla Model 3",
                    "supplier": { "_id": "s1" },
                    "type": "electric",
                    "gearbox": "automatic",
                    "mileage": 300,
                    "deposit": 1000,
                    "dailyPrice": 90,
                    "available": true,
                }],
            }])))
            .mount(&server)
            .await;

        let err = client(&server)
            .execute(Select(By::new(intent("", filter::Filter::default(), 1))))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("electric"), "{err}");
    }

    #[tokio::test]
    async fn lists_suppliers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/all-suppliers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "_id": "s1", "fullName": "Avis" },
                { "_id": "s2", "fullName": "Budget" },
            ])))
            .mount(&server)
            .await;

        let options: filter::Options = client(&server)
            .execute(Select(By::<filter::Options, ()>::new(())))
            .await
            .unwrap();

        assert_eq!(options.suppliers.len(), 2);
        assert_eq!(options.suppliers[1].name, "Budget");
        assert_eq!(options.all_suppliers().len(), 2);
    }
}
