//! Values that carry a calendar date plus whatever else must survive
//! recurrence: time of day, offset, zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// ## Summary
/// A point in time whose calendar date can be replaced independently of its
/// time of day and zone.
///
/// Recurrence cursors compute occurrence dates on [`NaiveDate`] and rebuild
/// each yielded value through [`Moment::with_calendar_date`].
pub trait Moment: Clone {
    /// Returns the local calendar date.
    fn calendar_date(&self) -> NaiveDate;

    /// ## Summary
    /// Returns a copy of `self` on `date`, keeping the wall-clock time and
    /// zone.
    ///
    /// Returns `None` when the wall-clock time does not exist on `date` in
    /// the zone, e.g. inside a daylight-saving gap.
    fn with_calendar_date(&self, date: NaiveDate) -> Option<Self>;
}

impl Moment for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }

    fn with_calendar_date(&self, date: NaiveDate) -> Option<Self> {
        Some(date)
    }
}

impl Moment for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }

    fn with_calendar_date(&self, date: NaiveDate) -> Option<Self> {
        Some(date.and_time(self.time()))
    }
}

impl<Tz: TimeZone> Moment for DateTime<Tz> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }

    fn with_calendar_date(&self, date: NaiveDate) -> Option<Self> {
        // Ambiguous local times (DST fall-back) resolve to the earlier instant.
        self.timezone()
            .from_local_datetime(&date.and_time(self.time()))
            .earliest()
    }
}
