//! Recurrence patterns and the lazy occurrence sequences they produce.
//!
//! A [`RecurrencePattern`] is an immutable rule. Each call to
//! [`RecurrencePattern::recurrences_from`] builds a fresh cursor, so the same
//! pattern can be iterated any number of times, from any thread, without
//! interference. Sequences are unbounded; callers limit them with
//! [`Iterator::take`] or similar. A sequence ends only when the next
//! occurrence would fall after [`max_date`].

mod daily;
mod monthly;
mod weekly;
mod yearly;

use std::fmt;
use std::iter::FusedIterator;

use chrono::{NaiveDate, Weekday};
use trove_core::error::{ensure_at_least, ensure_in_range};

use crate::calendar::{days_in_month, max_date, nth_weekday_in_month};
use crate::days_of_week::DaysOfWeek;
use crate::error::DateResult;
use crate::moment::Moment;
use crate::week_of_month::WeekOfMonth;

pub use daily::Daily;
pub use monthly::{MonthlyByDay, MonthlyByWeek};
pub use weekly::Weekly;
pub use yearly::{YearlyByDay, YearlyByMonthDay, YearlyByWeek};

use daily::DailyCursor;
use monthly::{MonthlyByDayCursor, MonthlyByWeekCursor};
use weekly::WeeklyCursor;
use yearly::YearlyCursor;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// ## Summary
/// A periodic rule for generating calendar dates.
///
/// Build one through the validating constructors ([`RecurrencePattern::daily`],
/// [`RecurrencePattern::weekly`], ...). Two patterns are equal when they are
/// the same variant with the same fields.
///
/// When several weekdays qualify for a week-of-month slot, the earliest date
/// in the period wins, except for [`WeekOfMonth::Last`] where the latest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrencePattern {
    Daily(Daily),
    Weekly(Weekly),
    MonthlyByDay(MonthlyByDay),
    MonthlyByWeek(MonthlyByWeek),
    YearlyByDay(YearlyByDay),
    YearlyByMonthDay(YearlyByMonthDay),
    YearlyByWeek(YearlyByWeek),
}

impl RecurrencePattern {
    /// ## Summary
    /// Every `interval` days.
    ///
    /// ## Errors
    /// Returns an out-of-range error if `interval` is 0.
    pub fn daily(interval: u32) -> DateResult<Self> {
        ensure_at_least("interval", interval, 1)?;
        Ok(Self::created(Self::Daily(Daily { interval })))
    }

    /// ## Summary
    /// The selected weekdays of every `interval`-th week, with weeks
    /// beginning on `first_day_of_week`.
    ///
    /// An empty `days` set is accepted and produces an empty sequence.
    ///
    /// ## Errors
    /// Returns an out-of-range error if `interval` is 0.
    pub fn weekly(days: DaysOfWeek, interval: u32, first_day_of_week: Weekday) -> DateResult<Self> {
        ensure_at_least("interval", interval, 1)?;
        Ok(Self::created(Self::Weekly(Weekly {
            days,
            interval,
            first_day_of_week,
        })))
    }

    /// ## Summary
    /// Day `day_of_month` of every `interval`-th month. Months without that
    /// day are skipped.
    ///
    /// ## Errors
    /// Returns an out-of-range error if `day_of_month` is outside `1..=31` or
    /// `interval` is 0.
    pub fn monthly_by_day(day_of_month: u32, interval: u32) -> DateResult<Self> {
        ensure_in_range("day_of_month", day_of_month, 1..=31)?;
        ensure_at_least("interval", interval, 1)?;
        Ok(Self::created(Self::MonthlyByDay(MonthlyByDay {
            day_of_month,
            interval,
        })))
    }

    /// ## Summary
    /// One of `days` in week `week_of_month` of every `interval`-th month.
    ///
    /// ## Errors
    /// Returns an out-of-range error if `interval` is 0.
    pub fn monthly_by_week(week_of_month: WeekOfMonth, days: DaysOfWeek, interval: u32) -> DateResult<Self> {
        ensure_at_least("interval", interval, 1)?;
        Ok(Self::created(Self::MonthlyByWeek(MonthlyByWeek {
            week_of_month,
            days,
            interval,
        })))
    }

    /// ## Summary
    /// Day `day_of_year` of every `interval`-th year. Day 366 only occurs in
    /// leap years.
    ///
    /// ## Errors
    /// Returns an out-of-range error if `day_of_year` is outside `1..=366` or
    /// `interval` is 0.
    pub fn yearly_by_day(day_of_year: u32, interval: u32) -> DateResult<Self> {
        ensure_in_range("day_of_year", day_of_year, 1..=366)?;
        ensure_at_least("interval", interval, 1)?;
        Ok(Self::created(Self::YearlyByDay(YearlyByDay {
            day_of_year,
            interval,
        })))
    }

    /// ## Summary
    /// `month`/`day_of_month` of every `interval`-th year. February 29th only
    /// occurs in leap years.
    ///
    /// ## Errors
    /// Returns an out-of-range error if `month` is outside `1..=12`, if
    /// `day_of_month` exceeds the longest form of that month, or if
    /// `interval` is 0.
    pub fn yearly_by_month_day(month: u32, day_of_month: u32, interval: u32) -> DateResult<Self> {
        ensure_in_range("month", month, 1..=12)?;
        // 2000 is a leap year, so February allows the 29th.
        ensure_in_range("day_of_month", day_of_month, 1..=days_in_month(2000, month))?;
        ensure_at_least("interval", interval, 1)?;
        Ok(Self::created(Self::YearlyByMonthDay(YearlyByMonthDay {
            month,
            day_of_month,
            interval,
        })))
    }

    /// ## Summary
    /// One of `days` in week `week_of_month` of `month`, every
    /// `interval`-th year.
    ///
    /// ## Errors
    /// Returns an out-of-range error if `month` is outside `1..=12` or
    /// `interval` is 0.
    pub fn yearly_by_week(
        week_of_month: WeekOfMonth,
        days: DaysOfWeek,
        month: u32,
        interval: u32,
    ) -> DateResult<Self> {
        ensure_in_range("month", month, 1..=12)?;
        ensure_at_least("interval", interval, 1)?;
        Ok(Self::created(Self::YearlyByWeek(YearlyByWeek {
            week_of_month,
            days,
            month,
            interval,
        })))
    }

    fn created(pattern: Self) -> Self {
        tracing::debug!(%pattern, "Created recurrence pattern");
        pattern
    }

    /// Returns the step between periods, in the variant's own unit.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        match self {
            Self::Daily(p) => p.interval(),
            Self::Weekly(p) => p.interval(),
            Self::MonthlyByDay(p) => p.interval(),
            Self::MonthlyByWeek(p) => p.interval(),
            Self::YearlyByDay(p) => p.interval(),
            Self::YearlyByMonthDay(p) => p.interval(),
            Self::YearlyByWeek(p) => p.interval(),
        }
    }

    /// ## Summary
    /// Returns the occurrences of this pattern on or after `start`.
    ///
    /// Every yielded value is `start` moved to another date, so its time of
    /// day and zone match `start`. Occurrences whose wall-clock time does not
    /// exist in the zone are skipped.
    #[must_use]
    pub fn recurrences_from<M: Moment>(&self, start: M) -> Recurrences<M> {
        let date = start.calendar_date();
        let cursor = match *self {
            Self::Daily(p) => Cursor::Daily(p.cursor(date)),
            Self::Weekly(p) => Cursor::Weekly(p.cursor(date)),
            Self::MonthlyByDay(p) => Cursor::MonthlyByDay(p.cursor(date)),
            Self::MonthlyByWeek(p) => Cursor::MonthlyByWeek(p.cursor(date)),
            Self::YearlyByDay(p) => Cursor::Yearly(p.cursor(date)),
            Self::YearlyByMonthDay(p) => Cursor::Yearly(p.cursor(date)),
            Self::YearlyByWeek(p) => Cursor::Yearly(p.cursor(date)),
        };
        Recurrences { start, cursor }
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily(p) => every(f, p.interval, "day"),
            Self::Weekly(p) => {
                every(f, p.interval, "week")?;
                write!(f, " on {} (week starts {})", p.days, p.first_day_of_week)
            }
            Self::MonthlyByDay(p) => {
                every(f, p.interval, "month")?;
                write!(f, " on day {}", p.day_of_month)
            }
            Self::MonthlyByWeek(p) => {
                every(f, p.interval, "month")?;
                write!(f, " on the {} {}", p.week_of_month, p.days)
            }
            Self::YearlyByDay(p) => {
                every(f, p.interval, "year")?;
                write!(f, " on day {}", p.day_of_year)
            }
            Self::YearlyByMonthDay(p) => {
                every(f, p.interval, "year")?;
                write!(f, " on {} {}", month_name(p.month), p.day_of_month)
            }
            Self::YearlyByWeek(p) => {
                every(f, p.interval, "year")?;
                write!(f, " on the {} {} in {}", p.week_of_month, p.days, month_name(p.month))
            }
        }
    }
}

fn every(f: &mut fmt::Formatter<'_>, interval: u32, unit: &str) -> fmt::Result {
    if interval == 1 {
        write!(f, "every {unit}")
    } else {
        write!(f, "every {interval} {unit}s")
    }
}

fn month_name(month: u32) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|month| MONTH_NAMES.get(month.checked_sub(1)?))
        .copied()
        .unwrap_or("?")
}

/// Picks the occurrence for one month: the earliest qualifying date, or the
/// latest for `Last`.
fn pick_weekday(week: WeekOfMonth, days: DaysOfWeek, month: u32, year: i32) -> Option<NaiveDate> {
    let candidates = days
        .iter()
        .filter_map(|day| nth_weekday_in_month(week, day, month, year));
    if week == WeekOfMonth::Last {
        candidates.max()
    } else {
        candidates.min()
    }
}

fn range_exhausted(pattern: &'static str) {
    tracing::trace!(pattern, max = %max_date(), "Recurrence reached the end of the representable range");
}

#[derive(Debug, Clone)]
enum Cursor {
    Daily(DailyCursor),
    Weekly(WeeklyCursor),
    MonthlyByDay(MonthlyByDayCursor),
    MonthlyByWeek(MonthlyByWeekCursor),
    Yearly(YearlyCursor),
}

impl Iterator for Cursor {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        match self {
            Self::Daily(c) => c.next(),
            Self::Weekly(c) => c.next(),
            Self::MonthlyByDay(c) => c.next(),
            Self::MonthlyByWeek(c) => c.next(),
            Self::Yearly(c) => c.next(),
        }
    }
}

/// ## Summary
/// Lazy sequence of occurrences produced by
/// [`RecurrencePattern::recurrences_from`].
///
/// Owns its iteration state; dropping or exhausting it has no effect on the
/// pattern or on other sequences.
#[derive(Debug, Clone)]
pub struct Recurrences<M> {
    start: M,
    cursor: Cursor,
}

impl<M: Moment> Recurrences<M> {
    /// Returns the value the sequence was started from.
    #[must_use]
    pub const fn start(&self) -> &M {
        &self.start
    }
}

impl<M: Moment> Iterator for Recurrences<M> {
    type Item = M;

    fn next(&mut self) -> Option<M> {
        loop {
            let date = self.cursor.next()?;
            match self.start.with_calendar_date(date) {
                Some(moment) => return Some(moment),
                None => tracing::trace!(%date, "Local time does not exist on this date, skipping"),
            }
        }
    }
}

impl<M: Moment> FusedIterator for Recurrences<M> {}
