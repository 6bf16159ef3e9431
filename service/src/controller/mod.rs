//! [`CarList`] controller keeping a displayed car list in sync with the
//! user's search.

pub mod accumulator;
pub mod event;
pub mod scroll;

use common::pagination::{Number, Size};
use derive_more::{Display, Error as StdError};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Car,
    infra::backend,
    query::{self, Query},
    read::car::{list, Filter},
};

pub use self::{
    accumulator::{Accumulator, Merge},
    event::{Change, Event},
    scroll::{FetchOffset, Metrics, Phase, ScrollRegion, Watcher},
};

/// [`CarList`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// [`Size`] of every requested page.
    pub page_size: Size,

    /// Distance from the bottom at which the next page is requested.
    pub fetch_offset: FetchOffset,
}

/// Number identifying an issued [`Fetch`].
///
/// Grows with every issued [`Fetch`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Ord, PartialEq, PartialOrd,
)]
pub struct Sequence(u64);

impl Sequence {
    /// Returns the [`Sequence`] following this one.
    #[must_use]
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Controller of a displayed [`Car`] list.
///
/// Owns the current [`list::Keyword`] and [`Filter`], the displayed list and
/// the infinite scroll state. Handles a single [`Event`] or fetch
/// [`Completion`] at a time.
#[derive(Debug)]
pub struct CarList<R> {
    /// Configuration of this [`CarList`].
    config: Config,

    /// [`ScrollRegion`] displaying the list.
    region: R,

    /// Current [`list::Keyword`].
    keyword: list::Keyword,

    /// Current [`Filter`].
    filter: Filter,

    /// Last issued [`list::Intent`], if any.
    issued: Option<list::Intent>,

    /// [`Sequence`] of the last issued [`Fetch`].
    sequence: Sequence,

    /// Displayed [`Car`]s.
    accumulator: Accumulator<Car>,

    /// Infinite scroll state.
    watcher: Watcher,

    /// Total number of [`Car`]s matching the current query, as last
    /// reported.
    row_count: Option<usize>,

    /// Indicator whether the action of creating a new [`Car`] is shown.
    create_visible: bool,
}

impl<R: ScrollRegion> CarList<R> {
    /// Creates a new empty [`CarList`] displayed in the provided
    /// [`ScrollRegion`].
    #[must_use]
    pub fn new(config: Config, region: R) -> Self {
        Self {
            config,
            region,
            keyword: list::Keyword::default(),
            filter: Filter::default(),
            issued: None,
            sequence: Sequence::default(),
            accumulator: Accumulator::default(),
            watcher: Watcher::default(),
            row_count: None,
            create_visible: false,
        }
    }

    /// Handles the provided [`Event`], returning the [`Fetch`] to be run, if
    /// any.
    pub fn handle(&mut self, event: Event) -> Option<Fetch> {
        match event {
            Event::Search(keyword) => {
                self.keyword = keyword;
                Some(self.new_search())
            }
            Event::FilterLoaded(value) => {
                let change = Change::of(&self.filter, &value);
                self.filter.set(value);
                self.create_visible = true;
                (change == Change::NewSearch || self.issued.is_none())
                    .then(|| self.new_search())
            }
            Event::FilterChanged(value) => {
                if Change::of(&self.filter, &value) == Change::Reload {
                    log::debug!(
                        "`{:?}` filter is unchanged, reloading",
                        value.dimension(),
                    );
                    return None;
                }
                self.filter.set(value);
                Some(self.new_search())
            }
            Event::Scrolled(metrics) => {
                let current = self.issued.as_ref()?;
                let number = self.watcher.on_scroll(
                    &metrics,
                    self.config.fetch_offset,
                    self.accumulator.has_more(),
                )?;
                let next = list::next_page(current);
                debug_assert_eq!(next.arguments.number, number, "page drift");
                Some(self.issue(next))
            }
        }
    }

    /// Applies the provided [`Completion`] of a [`Fetch`] to the displayed
    /// list.
    ///
    /// [`Completion`]s of any [`Fetch`] but the last issued one are
    /// discarded.
    pub fn complete(&mut self, completion: Completion) -> Outcome {
        let Completion {
            sequence,
            intent,
            result,
        } = completion;

        if sequence != self.sequence {
            log::debug!(
                "discarded stale page {} of fetch #{sequence}, \
                 latest is #{}",
                intent.arguments.number,
                self.sequence,
            );
            return Outcome::Discarded;
        }

        let number = intent.arguments.number;
        match result {
            Ok(page) => {
                if let Some(total) = page.total {
                    self.row_count = Some(total);
                } else if number.is_first() {
                    self.row_count = None;
                }
                let merge =
                    self.accumulator.merge(number, page, intent.arguments.size);
                self.watcher.finish(self.accumulator.has_more());

                log::debug!(
                    "applied page {number} of fetch #{sequence}: {} cars \
                     displayed, {}",
                    self.accumulator.items().len(),
                    self.watcher.phase(),
                );
                Outcome::Applied(merge)
            }
            Err(e) => {
                log::error!("failed to fetch page {number} of cars: {e}");
                if number.is_first() {
                    self.accumulator.clear();
                    self.row_count = None;
                }
                self.watcher.fail();
                Outcome::Failed(FetchError(e))
            }
        }
    }

    /// Starts over from the first page of the current query.
    fn new_search(&mut self) -> Fetch {
        self.watcher.reset();
        self.region.scroll_to_top();
        let intent = list::intent(
            self.keyword.clone(),
            self.filter.clone(),
            list::Arguments::first(self.config.page_size),
        );
        self.issue(intent)
    }

    /// Issues a new [`Fetch`] of the provided [`list::Intent`].
    fn issue(&mut self, intent: list::Intent) -> Fetch {
        self.watcher.start();
        self.sequence = self.sequence.next();
        self.issued = Some(intent.clone());

        log::debug!(
            "issued fetch #{} of page {}",
            self.sequence,
            intent.arguments.number,
        );
        Fetch {
            sequence: self.sequence,
            intent,
        }
    }
}

impl<R> CarList<R> {
    /// Returns the displayed [`Car`]s.
    #[must_use]
    pub fn cars(&self) -> &[Car] {
        self.accumulator.items()
    }

    /// Indicates whether more pages are likely available.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.accumulator.has_more()
    }

    /// Returns the current infinite scroll [`Phase`].
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.watcher.phase()
    }

    /// Indicates whether a page is being fetched.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.watcher.phase() == Phase::Loading
    }

    /// Returns [`Number`] of the last requested page.
    #[must_use]
    pub fn page(&self) -> Number {
        self.watcher.page()
    }

    /// Returns the last issued [`list::Intent`], if any.
    #[must_use]
    pub fn intent(&self) -> Option<&list::Intent> {
        self.issued.as_ref()
    }

    /// Returns the current [`list::Keyword`].
    #[must_use]
    pub fn keyword(&self) -> &list::Keyword {
        &self.keyword
    }

    /// Returns total number of [`Car`]s matching the current query, if
    /// reported.
    #[must_use]
    pub fn row_count(&self) -> Option<usize> {
        self.row_count
    }

    /// Indicates whether the action of creating a new [`Car`] is shown.
    #[must_use]
    pub fn create_visible(&self) -> bool {
        self.create_visible
    }

    /// Returns the [`ScrollRegion`] displaying this [`CarList`].
    #[must_use]
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Returns the [`ScrollRegion`] displaying this [`CarList`] for
    /// rendering.
    pub fn region_mut(&mut self) -> &mut R {
        &mut self.region
    }
}

/// Ticket of a page fetch issued by a [`CarList`].
///
/// Doesn't borrow the [`CarList`], so it may be run concurrently with
/// handling further [`Event`]s.
#[derive(Clone, Debug)]
pub struct Fetch {
    /// [`Sequence`] this [`Fetch`] was issued with.
    sequence: Sequence,

    /// [`list::Intent`] to fetch.
    intent: list::Intent,
}

impl Fetch {
    /// Returns [`Sequence`] this [`Fetch`] was issued with.
    #[must_use]
    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Returns [`list::Intent`] of this [`Fetch`].
    #[must_use]
    pub fn intent(&self) -> &list::Intent {
        &self.intent
    }

    /// Runs this [`Fetch`] against the provided service.
    pub async fn run<S>(self, service: &S) -> Completion
    where
        S: Query<
            query::cars::List,
            Ok = list::Page,
            Err = Traced<backend::Error>,
        >,
    {
        let result = service
            .execute(query::cars::List::by(self.intent.clone()))
            .await
            .map_err(tracerr::wrap!());
        Completion {
            sequence: self.sequence,
            intent: self.intent,
            result,
        }
    }
}

/// Result of running a [`Fetch`].
#[derive(Debug)]
pub struct Completion {
    /// [`Sequence`] of the completed [`Fetch`].
    sequence: Sequence,

    /// [`list::Intent`] of the completed [`Fetch`].
    intent: list::Intent,

    /// Fetched [`list::Page`] or the failure.
    result: Result<list::Page, Traced<backend::Error>>,
}

/// Outcome of applying a [`Completion`] to a [`CarList`].
#[derive(Debug)]
pub enum Outcome {
    /// Fetched page has been merged into the displayed list.
    Applied(Merge),

    /// A newer [`Fetch`] has been issued meanwhile, so the page is ignored.
    Discarded,

    /// [`Fetch`] failed.
    Failed(FetchError),
}

/// Error of a failed [`Fetch`].
#[derive(Debug, Display, StdError)]
#[display("failed to fetch cars: {_0}")]
pub struct FetchError(Traced<backend::Error>);

impl FetchError {
    /// Returns the traced [`backend::Error`] causing this [`FetchError`].
    #[must_use]
    pub fn into_inner(self) -> Traced<backend::Error> {
        self.0
    }
}
