//! [`Command`]s typed into the terminal.

use std::str::FromStr;

use clap::{CommandFactory as _, Parser, Subcommand};
use common::{DateTime, Selection};
use rust_decimal::Decimal;
use service::{
    controller::{Event, Metrics},
    domain::{
        car::{Availability, Fuel, Gearbox, Mileage, Range},
        location::Coordinates,
        supplier,
    },
    read::car::{
        filter::{self, Deposit, Dimension, Value},
        list,
    },
};

use crate::define_error;

define_error! {
    enum CommandError {
        #[code = "UNKNOWN_COMMAND"]
        #[message = "Unknown command, type `help` to list them"]
        UnknownCommand,

        #[code = "UNKNOWN_FILTER"]
        #[message = "Unknown filter"]
        UnknownFilter,

        #[code = "MISSING_ARGUMENT"]
        #[message = "Command is missing an argument"]
        MissingArgument,

        #[code = "INVALID_ARGUMENT"]
        #[message = "Command argument is invalid"]
        InvalidArgument,
    }
}

/// Line typed into the terminal.
#[derive(Debug, Parser)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
struct Line {
    /// Typed [`Input`].
    #[command(subcommand)]
    input: Input,
}

/// Grammar of the terminal [`Command`]s.
#[derive(Debug, Subcommand)]
enum Input {
    /// Search cars by name.
    Search {
        /// Words of the keyword.
        words: Vec<String>,
    },

    /// Change a filter, comma-separating values, or `all`/`none`.
    Filter {
        /// Name of the filter.
        name: String,

        /// Selected values.
        values: String,
    },

    /// Report the list scroll position.
    Scroll {
        /// Distance scrolled from the top.
        top: f64,

        /// Height of the whole list.
        height: f64,

        /// Height of the visible part of the list.
        viewport: f64,
    },

    /// Print the displayed cars.
    Show,

    /// Pick the pickup location.
    Pickup {
        /// Latitude of the location.
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the location.
        #[arg(allow_negative_numbers = true)]
        lng: f64,

        /// Name of the location.
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Pick the current position.
    Here {
        /// Latitude of the position.
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the position.
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },

    /// Set the rental start (RFC 3339).
    From {
        /// Start of the rental.
        #[arg(value_parser = DateTime::from_rfc3339)]
        at: DateTime,
    },

    /// Choose car ranges, comma-separated, or `all`.
    Ranges {
        /// Selected ranges.
        values: String,
    },

    /// Submit the search form.
    Book,

    /// Print this usage.
    Help,

    /// Exit.
    #[command(alias = "exit")]
    Quit,
}

/// Returns usage of every [`Command`].
#[must_use]
pub fn help() -> String {
    Line::command().render_help().to_string()
}

/// Command typed into the terminal.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// [`Event`] for the car list.
    List(Event),

    /// Print the displayed cars.
    Show,

    /// Pick a named pickup location.
    Pickup {
        /// Name of the location.
        name: String,

        /// [`Coordinates`] of the location.
        coordinates: Coordinates,
    },

    /// Pick the current position as the pickup location.
    Here(Coordinates),

    /// Set the start of the rental.
    From(DateTime),

    /// Choose car [`Range`]s, [`None`] meaning all of them.
    Ranges(Option<Selection<Range>>),

    /// Submit the search form.
    Book,

    /// Print the usage.
    Help,

    /// Exit.
    Quit,
}

impl Command {
    /// Parses a [`Command`] out of the provided `line`.
    ///
    /// [`filter::Options`] resolve the `all` suppliers selection.
    ///
    /// # Errors
    ///
    /// If the `line` is not a valid [`Command`].
    pub fn parse(
        line: &str,
        options: &filter::Options,
    ) -> Result<Self, CommandError> {
        let Line { input } = Line::try_parse_from(line.split_whitespace())?;

        Ok(match input {
            Input::Search { words } => {
                Self::List(Event::Search(list::Keyword::new(words.join(" "))))
            }
            Input::Filter { name, values } => {
                let value = value(dimension(&name)?, &values, options)?;
                Self::List(Event::FilterChanged(value))
            }
            Input::Scroll {
                top,
                height,
                viewport,
            } => Self::List(Event::Scrolled(Metrics {
                scroll_top: top,
                scroll_height: height,
                viewport_height: viewport,
            })),
            Input::Show => Self::Show,
            Input::Pickup { lat, lng, name } => Self::Pickup {
                name: name.join(" "),
                coordinates: Coordinates {
                    latitude: lat,
                    longitude: lng,
                },
            },
            Input::Here { lat, lng } => Self::Here(Coordinates {
                latitude: lat,
                longitude: lng,
            }),
            Input::From { at } => Self::From(at),
            Input::Ranges { values } => Self::Ranges(
                (values != "all").then(|| kinds(&values)).transpose()?,
            ),
            Input::Book => Self::Book,
            Input::Help => Self::Help,
            Input::Quit => Self::Quit,
        })
    }
}

impl From<clap::Error> for CommandError {
    fn from(e: clap::Error) -> Self {
        use clap::error::ErrorKind as K;

        match e.kind() {
            K::InvalidSubcommand
            | K::MissingSubcommand
            | K::DisplayHelpOnMissingArgumentOrSubcommand => {
                Self::UnknownCommand
            }
            K::MissingRequiredArgument => Self::MissingArgument,
            _ => Self::InvalidArgument,
        }
    }
}

/// Parses a [`Dimension`] by its name.
fn dimension(name: &str) -> Result<Dimension, CommandError> {
    Ok(match name {
        "suppliers" | "supplier" => Dimension::Suppliers,
        "fuel" => Dimension::Fuel,
        "gearbox" => Dimension::Gearbox,
        "mileage" => Dimension::Mileage,
        "deposit" => Dimension::Deposit,
        "availability" => Dimension::Availability,
        _ => return Err(CommandError::UnknownFilter),
    })
}

/// Parses a [`Value`] of the provided [`Dimension`].
fn value(
    dimension: Dimension,
    arg: &str,
    options: &filter::Options,
) -> Result<Value, CommandError> {
    Ok(match dimension {
        Dimension::Suppliers => Value::Suppliers(match arg {
            "all" => options.all_suppliers(),
            "none" => Selection::empty(),
            ids => ids.split(',').map(supplier::Id::from).collect(),
        }),
        Dimension::Fuel => Value::Fuel(selection(arg, Fuel::ALL)?),
        Dimension::Gearbox => Value::Gearbox(selection(arg, Gearbox::ALL)?),
        Dimension::Mileage => Value::Mileage(selection(arg, Mileage::ALL)?),
        Dimension::Deposit => Value::Deposit(deposit(arg)?),
        Dimension::Availability => {
            Value::Availability(selection(arg, Availability::ALL)?)
        }
    })
}

/// Parses a [`Selection`] of kinds, accepting `all` and `none`.
fn selection<T>(arg: &str, all: &[T]) -> Result<Selection<T>, CommandError>
where
    T: Copy + FromStr + Ord,
{
    match arg {
        "all" => Ok(Selection::all(all)),
        "none" => Ok(Selection::empty()),
        kinds_list => kinds(kinds_list),
    }
}

/// Parses comma-separated kinds, ignoring case.
fn kinds<T>(arg: &str) -> Result<Selection<T>, CommandError>
where
    T: FromStr + Ord,
{
    arg.split(',')
        .map(|kind| {
            kind.trim()
                .to_uppercase()
                .parse()
                .map_err(|_| CommandError::InvalidArgument)
        })
        .collect()
}

/// Parses a [`Deposit`] threshold by its limit or `any`.
fn deposit(arg: &str) -> Result<Deposit, CommandError> {
    let limit = match arg {
        "any" => None,
        limit => Some(
            limit
                .parse::<Decimal>()
                .map_err(|_| CommandError::InvalidArgument)?,
        ),
    };
    Deposit::from_limit(limit).ok_or(CommandError::InvalidArgument)
}
