//! Infinite scroll [`Watcher`] and the scrolled region abstractions.

use common::pagination::Number;
use derive_more::{Display, From, Into};

/// Scrollable region displaying a car list.
pub trait ScrollRegion {
    /// Scrolls this region back to its very top.
    fn scroll_to_top(&mut self);
}

impl<R: ScrollRegion + ?Sized> ScrollRegion for &mut R {
    fn scroll_to_top(&mut self) {
        (**self).scroll_to_top();
    }
}

/// Scroll position of a [`ScrollRegion`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    /// Distance the content is scrolled from its top.
    pub scroll_top: f64,

    /// Full height of the scrolled content.
    pub scroll_height: f64,

    /// Height of the visible part of the content.
    pub viewport_height: f64,
}

impl Metrics {
    /// Indicates whether the visible part of the content reaches the
    /// provided [`FetchOffset`] from the bottom.
    #[must_use]
    pub fn is_near_bottom(&self, offset: FetchOffset) -> bool {
        self.scroll_top + self.viewport_height
            >= self.scroll_height - offset.0
    }
}

/// Distance from the bottom of a [`ScrollRegion`] at which the next page is
/// requested.
#[derive(Clone, Copy, Debug, Display, From, Into, PartialEq, PartialOrd)]
pub struct FetchOffset(f64);

/// Phase of a [`Watcher`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Phase {
    /// Waiting for the user to scroll near the bottom.
    Idle,

    /// A page is being fetched.
    Loading,

    /// No more pages are available for the current query.
    Exhausted,
}

/// State machine deciding when the next page should be fetched.
#[derive(Clone, Copy, Debug)]
pub struct Watcher {
    /// Current [`Phase`] of this [`Watcher`].
    phase: Phase,

    /// [`Number`] of the last requested page.
    page: Number,
}

impl Default for Watcher {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            page: Number::FIRST,
        }
    }
}

impl Watcher {
    /// Returns the current [`Phase`] of this [`Watcher`].
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns [`Number`] of the last requested page.
    #[must_use]
    pub fn page(&self) -> Number {
        self.page
    }

    /// Rewinds this [`Watcher`] to the first page of a new query.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.page = Number::FIRST;
    }

    /// Marks the current page as being fetched.
    pub fn start(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Handles the provided scroll [`Metrics`], returning the [`Number`] of
    /// the page to fetch next, if any.
    ///
    /// Advances only while [`Phase::Idle`], when more pages are available and
    /// the region is scrolled near its bottom.
    pub fn on_scroll(
        &mut self,
        metrics: &Metrics,
        offset: FetchOffset,
        has_more: bool,
    ) -> Option<Number> {
        if self.phase != Phase::Idle
            || !has_more
            || !metrics.is_near_bottom(offset)
        {
            return None;
        }
        self.page = self.page.next();
        self.phase = Phase::Loading;
        Some(self.page)
    }

    /// Completes the fetch of the current page.
    pub fn finish(&mut self, has_more: bool) {
        self.phase = if has_more { Phase::Idle } else { Phase::Exhausted };
    }

    /// Stops loading after the fetch of the current page failed.
    pub fn fail(&mut self) {
        self.phase = Phase::Exhausted;
    }
}

#[cfg(test)]
mod spec {
    use super::{FetchOffset, Metrics, Phase, Watcher};

    const METRICS: Metrics = Metrics {
        scroll_top: 500.0,
        scroll_height: 1400.0,
        viewport_height: 800.0,
    };

    #[test]
    fn detects_bottom_within_offset() {
        assert!(METRICS.is_near_bottom(FetchOffset::from(100.0)));
        assert!(!METRICS.is_near_bottom(FetchOffset::from(50.0)));
    }

    #[test]
    fn advances_only_when_idle() {
        let offset = FetchOffset::from(100.0);
        let mut watcher = Watcher::default();
        watcher.start();

        assert_eq!(watcher.on_scroll(&METRICS, offset, true), None);

        watcher.finish(true);
        assert_eq!(watcher.phase(), Phase::Idle);
        assert_eq!(
            watcher.on_scroll(&METRICS, offset, true).map(|n| n.get()),
            Some(2),
        );
        assert_eq!(watcher.phase(), Phase::Loading);
        assert_eq!(watcher.on_scroll(&METRICS, offset, true), None);
    }

    #[test]
    fn stays_put_without_more_pages_or_far_from_bottom() {
        let mut watcher = Watcher::default();

        assert_eq!(
            watcher.on_scroll(&METRICS, FetchOffset::from(100.0), false),
            None,
        );
        assert_eq!(
            watcher.on_scroll(&METRICS, FetchOffset::from(50.0), true),
            None,
        );
        assert_eq!(watcher.phase(), Phase::Idle);
        assert!(watcher.page().is_first());
    }

    #[test]
    fn exhausts_and_resets() {
        let mut watcher = Watcher::default();
        watcher.start();
        watcher.finish(false);
        assert_eq!(watcher.phase(), Phase::Exhausted);
        assert_eq!(
            watcher.on_scroll(&METRICS, FetchOffset::from(100.0), true),
            None,
        );

        watcher.reset();
        assert_eq!(watcher.phase(), Phase::Idle);

        watcher.start();
        watcher.fail();
        assert_eq!(watcher.phase(), Phase::Exhausted);
    }
}
