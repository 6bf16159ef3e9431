//! Search [`Form`] choosing where and when a car is picked up.

use common::{DateTime, DateTimeOf, Selection};
use derive_more::{Display, Error as StdError};

use crate::domain::{
    car::Range,
    location::{self, Coordinates},
    Location,
};

/// Kind of a [`DateTime`] a rental starts at.
#[derive(Clone, Copy, Debug)]
pub enum Start {}

/// [`DateTime`] a rental starts at.
pub type StartDateTime = DateTimeOf<Start>;

/// State of the car search form.
#[derive(Clone, Debug)]
pub struct Form {
    /// Picked up pickup [`Location`], if any.
    location: Option<Location>,

    /// Picked up start of the rental, if any.
    from: Option<StartDateTime>,

    /// Selected car [`Range`]s.
    ranges: Selection<Range>,

    /// Earliest allowed start of the rental.
    min_date: StartDateTime,
}

impl Default for Form {
    fn default() -> Self {
        Self::new(DateTime::now())
    }
}

impl Form {
    /// Creates a new empty [`Form`] filled at the provided moment.
    ///
    /// A rental may start no sooner than a day later.
    #[must_use]
    pub fn new(now: DateTime) -> Self {
        Self {
            location: None,
            from: None,
            ranges: Selection::all(Range::ALL),
            min_date: now.days_later(1).truncated_to_minutes().coerce(),
        }
    }

    /// Picks a pickup [`Location`] found by the provided `name`.
    ///
    /// Returns the [`location::Id`] assigned to it.
    pub fn pick_location(
        &mut self,
        name: impl Into<String>,
        coordinates: Coordinates,
    ) -> location::Id {
        let id = location::Id::new();
        self.location = Some(Location {
            id,
            name: name.into(),
            coordinates,
        });
        id
    }

    /// Picks the current position of the user as the pickup [`Location`].
    pub fn use_current_position(
        &mut self,
        coordinates: Coordinates,
    ) -> location::Id {
        let Coordinates {
            latitude,
            longitude,
        } = coordinates;
        self.pick_location(
            format!("Lat: {latitude}, Lng: {longitude}"),
            coordinates,
        )
    }

    /// Sets the start of the rental, with minute precision.
    pub fn set_from(&mut self, from: StartDateTime) {
        self.from = Some(from.truncated_to_minutes());
    }

    /// Sets the car [`Range`]s to search in.
    ///
    /// [`None`] selects every [`Range`].
    pub fn set_ranges(&mut self, ranges: Option<Selection<Range>>) {
        self.ranges = ranges.unwrap_or_else(|| Selection::all(Range::ALL));
    }

    /// Returns the picked pickup [`Location`], if any.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Returns the selected car [`Range`]s.
    #[must_use]
    pub fn ranges(&self) -> &Selection<Range> {
        &self.ranges
    }

    /// Validates this [`Form`] and builds the [`Target`] of the search.
    ///
    /// # Errors
    ///
    /// If the pickup [`Location`] or the start of the rental is missing, or
    /// the start is sooner than allowed.
    pub fn submit(&self) -> Result<Target, SubmitError> {
        let location = self.location.as_ref().ok_or(SubmitError::NoLocation)?;
        let from = self.from.ok_or(SubmitError::NoStart)?;
        if from < self.min_date {
            return Err(SubmitError::TooEarly);
        }

        Ok(Target {
            pickup_location_id: location.id,
            from,
            ranges: self.ranges.clone(),
        })
    }
}

/// Search the [`Form`] navigates to.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    /// ID of the pickup [`Location`].
    pub pickup_location_id: location::Id,

    /// Start of the rental.
    pub from: StartDateTime,

    /// Car [`Range`]s to search in.
    pub ranges: Selection<Range>,
}

/// Error of submitting a [`Form`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum SubmitError {
    /// Pickup [`Location`] is not picked.
    #[display("pickup location is required")]
    NoLocation,

    /// Start of the rental is not set.
    #[display("start date is required")]
    NoStart,

    /// Start of the rental is sooner than allowed.
    #[display("start date must be tomorrow or later")]
    TooEarly,
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Selection};

    use crate::domain::{car::Range, location::Coordinates};

    use super::{Form, StartDateTime, SubmitError};

    fn start(s: &str) -> StartDateTime {
        StartDateTime::from_rfc3339(s).unwrap()
    }

    fn now() -> DateTime {
        DateTime::from_rfc3339("2024-06-10T09:30:00Z").unwrap()
    }

    const PARIS: Coordinates = Coordinates {
        latitude: 48.8566,
        longitude: 2.3522,
    };

    #[test]
    fn requires_location_and_start() {
        let mut form = Form::new(now());
        assert_eq!(form.submit(), Err(SubmitError::NoLocation));

        _ = form.pick_location("Paris", PARIS);
        assert_eq!(form.submit(), Err(SubmitError::NoStart));
    }

    #[test]
    fn rejects_start_before_tomorrow() {
        let mut form = Form::new(now());
        _ = form.pick_location("Paris", PARIS);

        form.set_from(start("2024-06-11T09:00:00Z"));
        assert_eq!(form.submit(), Err(SubmitError::TooEarly));

        form.set_from(start("2024-06-11T09:30:00Z"));
        assert!(form.submit().is_ok());
    }

    #[test]
    fn accepts_tomorrow_at_current_minute() {
        let now = DateTime::from_rfc3339("2024-06-10T09:30:45Z").unwrap();
        let mut form = Form::new(now);
        _ = form.pick_location("Paris", PARIS);

        form.set_from(start("2024-06-11T09:30:10Z"));
        assert!(form.submit().is_ok());

        form.set_from(start("2024-06-11T09:29:59Z"));
        assert_eq!(form.submit(), Err(SubmitError::TooEarly));
    }

    #[test]
    fn submits_target() {
        let mut form = Form::new(now());
        let id = form.pick_location("Paris", PARIS);
        form.set_from(start("2024-06-12T14:45:59Z"));
        form.set_ranges(Some(Selection::from([Range::Mini, Range::Scooter])));

        let target = form.submit().unwrap();

        assert_eq!(target.pickup_location_id, id);
        assert_eq!(target.from, start("2024-06-12T14:45:00Z"));
        assert_eq!(
            target.ranges,
            Selection::from([Range::Scooter, Range::Mini]),
        );
    }

    #[test]
    fn names_current_position() {
        let mut form = Form::new(now());
        let first = form.use_current_position(PARIS);

        let location = form.location().unwrap();
        assert_eq!(location.name, "Lat: 48.8566, Lng: 2.3522");
        assert_eq!(location.id, first);
        assert_ne!(form.pick_location("Paris", PARIS), first);
    }

    #[test]
    fn defaults_to_every_range() {
        let mut form = Form::new(now());
        assert_eq!(form.ranges().len(), 4);

        form.set_ranges(Some(Selection::from([Range::Maxi])));
        assert_eq!(form.ranges().len(), 1);

        form.set_ranges(None);
        assert_eq!(form.ranges(), &Selection::all(Range::ALL));
    }
}
