use chrono::{Datelike, NaiveDate};

use crate::calendar::{MAX_YEAR, days_in_month};
use crate::days_of_week::DaysOfWeek;
use crate::week_of_month::WeekOfMonth;

/// A fixed day of every `interval`-th month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthlyByDay {
    pub(super) day_of_month: u32,
    pub(super) interval: u32,
}

/// One weekday at a given week of every `interval`-th month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthlyByWeek {
    pub(super) week_of_month: WeekOfMonth,
    pub(super) days: DaysOfWeek,
    pub(super) interval: u32,
}

impl MonthlyByDay {
    #[must_use]
    pub const fn day_of_month(self) -> u32 {
        self.day_of_month
    }

    #[must_use]
    pub const fn interval(self) -> u32 {
        self.interval
    }

    pub(super) fn cursor(self, start: NaiveDate) -> MonthlyByDayCursor {
        let mut months = MonthCounter::from_date(start);
        if start.day() > self.day_of_month {
            months.advance(self.interval);
        }
        MonthlyByDayCursor {
            pattern: self,
            months,
            done: false,
        }
    }
}

impl MonthlyByWeek {
    #[must_use]
    pub const fn week_of_month(self) -> WeekOfMonth {
        self.week_of_month
    }

    #[must_use]
    pub const fn days(self) -> DaysOfWeek {
        self.days
    }

    #[must_use]
    pub const fn interval(self) -> u32 {
        self.interval
    }

    pub(super) fn cursor(self, start: NaiveDate) -> MonthlyByWeekCursor {
        MonthlyByWeekCursor {
            pattern: self,
            start,
            months: MonthCounter::from_date(start),
            first: true,
            done: self.days.is_empty(),
        }
    }
}

/// Months counted from year 0, so stepping never has to carry by hand.
#[derive(Debug, Clone, Copy)]
struct MonthCounter(i64);

impl MonthCounter {
    fn from_date(date: NaiveDate) -> Self {
        Self(i64::from(date.year()) * 12 + i64::from(date.month0()))
    }

    fn advance(&mut self, months: u32) {
        self.0 += i64::from(months);
    }

    /// Returns `(year, month)` or `None` once past the last representable year.
    fn year_month(self) -> Option<(i32, u32)> {
        let year = i32::try_from(self.0.div_euclid(12)).ok()?;
        let month = u32::try_from(self.0.rem_euclid(12)).ok()? + 1;
        (year <= MAX_YEAR).then_some((year, month))
    }
}

#[derive(Debug, Clone)]
pub(super) struct MonthlyByDayCursor {
    pattern: MonthlyByDay,
    months: MonthCounter,
    done: bool,
}

impl Iterator for MonthlyByDayCursor {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while !self.done {
            let Some((year, month)) = self.months.year_month() else {
                self.done = true;
                super::range_exhausted("monthly by day");
                break;
            };
            self.months.advance(self.pattern.interval);

            if self.pattern.day_of_month <= days_in_month(year, month) {
                return NaiveDate::from_ymd_opt(year, month, self.pattern.day_of_month);
            }
            tracing::trace!(year, month, day = self.pattern.day_of_month, "Month too short, skipping");
        }
        None
    }
}

#[derive(Debug, Clone)]
pub(super) struct MonthlyByWeekCursor {
    pattern: MonthlyByWeek,
    start: NaiveDate,
    months: MonthCounter,
    first: bool,
    done: bool,
}

impl Iterator for MonthlyByWeekCursor {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while !self.done {
            let candidate = self.months.year_month().and_then(|(year, month)| {
                super::pick_weekday(self.pattern.week_of_month, self.pattern.days, month, year)
            });
            self.months.advance(self.pattern.interval);

            let Some(date) = candidate else {
                self.done = true;
                super::range_exhausted("monthly by week");
                break;
            };

            let first = std::mem::replace(&mut self.first, false);
            if first && date < self.start {
                continue;
            }
            return Some(date);
        }
        None
    }
}
