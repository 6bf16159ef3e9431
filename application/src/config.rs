//! [`Config`]-related definitions.

use std::time;

use common::{money::Currency, pagination};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error as StdError};
use serde::Deserialize;
use service::controller;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Car service configuration.
    pub backend: Backend,

    /// Car list configuration.
    pub list: List,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Car service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Backend {
    /// Base URL of the car service API.
    #[default("http://127.0.0.1:4002".to_owned())]
    pub url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

/// Car list configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct List {
    /// Number of cars requested at once.
    #[default(15)]
    pub page_size: usize,

    /// Distance from the bottom of the list at which the next page is
    /// requested.
    #[default(15.0)]
    pub fetch_offset: f64,

    /// Currency the car service reports amounts in.
    #[default(Currency::Usd)]
    pub currency: Currency,
}

impl TryFrom<List> for controller::Config {
    type Error = ZeroPageSize;

    fn try_from(value: List) -> Result<Self, Self::Error> {
        let List {
            page_size,
            fetch_offset,
            currency: _,
        } = value;

        Ok(Self {
            page_size: pagination::Size::new(page_size).ok_or(ZeroPageSize)?,
            fetch_offset: fetch_offset.into(),
        })
    }
}

/// Error of a [`List`] configured to request empty pages.
#[derive(Clone, Copy, Debug, Display, StdError)]
#[display("`list.page_size` must be positive")]
pub struct ZeroPageSize;

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
