use std::{io, sync::OnceLock};

use application::{
    command, AsError as _, Args, Command, Config, Console, Error, Service,
};
use futures::{stream::FuturesUnordered, StreamExt as _};
use service::{
    controller::{self, Event, Outcome},
    infra::{http, Http},
    query::{self, Query as _},
    read::car::{
        filter::{self, Dimension, Value},
        Filter,
    },
    search, CarList,
};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args {
        config,
        backend: backend_url,
    } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config { backend, list, log } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let url = backend_url.unwrap_or(backend.url);
    let http = Http::new(&http::Config {
        url: url.parse().map_err(|e| {
            log::error!("`{url}` is not a valid car service URL: {e}");
        })?,
        timeout: backend.timeout,
        currency: list.currency,
    })
    .map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;
    let service = Service::new(http);

    let list_config = controller::Config::try_from(list).map_err(|e| {
        log::error!("invalid `Config`: {e}");
    })?;
    let mut list = CarList::new(list_config, Console::new(io::stdout()));
    let mut form = search::Form::default();

    log::info!("browsing cars of `{url}`, type `help` for commands");

    let options = service
        .execute(query::suppliers::All::by(()))
        .await
        .unwrap_or_else(|e| {
            log::error!("failed to load suppliers: {e}");
            notify(&e.as_error());
            filter::Options::default()
        });

    let mut fetches = FuturesUnordered::new();
    let defaults = Filter::default();
    for dimension in Dimension::ALL {
        let value = match dimension {
            Dimension::Suppliers => Value::Suppliers(options.all_suppliers()),
            Dimension::Fuel
            | Dimension::Gearbox
            | Dimension::Mileage
            | Dimension::Deposit
            | Dimension::Availability => defaults.value(dimension),
        };
        if let Some(fetch) = list.handle(Event::FilterLoaded(value)) {
            fetches.push(fetch.run(&service));
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_closed = false;
    while !input_closed || !fetches.is_empty() {
        tokio::select! {
            Some(completion) = fetches.next(), if !fetches.is_empty() => {
                match list.complete(completion) {
                    Outcome::Applied(_) => render(Console::render(&mut list)),
                    Outcome::Discarded => {}
                    Outcome::Failed(e) => {
                        notify(&e.into_inner().as_error());
                    }
                }
            }
            line = lines.next_line(), if !input_closed => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        input_closed = true;
                        continue;
                    }
                    Err(e) => {
                        log::error!("failed to read input: {e}");
                        return Err(());
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                match Command::parse(&line, &options) {
                    Ok(Command::List(event)) => {
                        if let Some(fetch) = list.handle(event) {
                            fetches.push(fetch.run(&service));
                        }
                    }
                    Ok(Command::Show) => render(Console::reprint(&mut list)),
                    Ok(Command::Pickup { name, coordinates }) => {
                        let id = form.pick_location(name, coordinates);
                        log::info!("pickup location `{id}` picked");
                    }
                    Ok(Command::Here(coordinates)) => {
                        let id = form.use_current_position(coordinates);
                        log::info!("current position `{id}` picked");
                    }
                    Ok(Command::From(from)) => form.set_from(from.coerce()),
                    Ok(Command::Ranges(ranges)) => form.set_ranges(ranges),
                    Ok(Command::Book) => match form.submit() {
                        Ok(search::Target {
                            pickup_location_id,
                            from,
                            ranges,
                        }) => {
                            log::info!(
                                "searching cars at `{pickup_location_id}` \
                                 from {} in {ranges:?}",
                                from.to_rfc3339(),
                            );
                        }
                        Err(e) => notify(&e.into_error()),
                    },
                    Ok(Command::Help) => println!("{}", command::help()),
                    Ok(Command::Quit) => break,
                    Err(e) => notify(&e.into_error()),
                }
            }
            else => break,
        }
    }

    Ok(())
}

/// Shows the provided [`Error`] to the user.
fn notify(err: &Error) {
    log::warn!("{err}");
}

/// Reports a failed print of the car list.
fn render(result: io::Result<()>) {
    if let Err(e) = result {
        log::error!("failed to print cars: {e}");
    }
}
