use chrono::{Datelike, NaiveDate};

use crate::calendar::{MAX_YEAR, is_leap_year};
use crate::days_of_week::DaysOfWeek;
use crate::week_of_month::WeekOfMonth;

/// A fixed day of the year, every `interval` years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearlyByDay {
    pub(super) day_of_year: u32,
    pub(super) interval: u32,
}

/// A fixed month and day, every `interval` years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearlyByMonthDay {
    pub(super) month: u32,
    pub(super) day_of_month: u32,
    pub(super) interval: u32,
}

/// One weekday at a given week of a fixed month, every `interval` years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearlyByWeek {
    pub(super) week_of_month: WeekOfMonth,
    pub(super) days: DaysOfWeek,
    pub(super) month: u32,
    pub(super) interval: u32,
}

impl YearlyByDay {
    #[must_use]
    pub const fn day_of_year(self) -> u32 {
        self.day_of_year
    }

    #[must_use]
    pub const fn interval(self) -> u32 {
        self.interval
    }

    pub(super) fn cursor(self, start: NaiveDate) -> YearlyCursor {
        let mut years = YearCounter::new(start.year(), self.interval);
        if start.ordinal() > self.day_of_year {
            years.advance();
        }
        YearlyCursor {
            rule: YearRule::Day(self),
            years,
            start,
            first: false,
            done: false,
        }
    }

    fn date_in(self, year: i32) -> Option<NaiveDate> {
        if self.day_of_year == 366 && !is_leap_year(year) {
            return None;
        }
        NaiveDate::from_yo_opt(year, self.day_of_year)
    }
}

impl YearlyByMonthDay {
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn day_of_month(self) -> u32 {
        self.day_of_month
    }

    #[must_use]
    pub const fn interval(self) -> u32 {
        self.interval
    }

    pub(super) fn cursor(self, start: NaiveDate) -> YearlyCursor {
        let mut years = YearCounter::new(start.year(), self.interval);
        if (start.month(), start.day()) > (self.month, self.day_of_month) {
            years.advance();
        }
        YearlyCursor {
            rule: YearRule::MonthDay(self),
            years,
            start,
            first: false,
            done: false,
        }
    }

    fn date_in(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day_of_month)
    }
}

impl YearlyByWeek {
    #[must_use]
    pub const fn week_of_month(self) -> WeekOfMonth {
        self.week_of_month
    }

    #[must_use]
    pub const fn days(self) -> DaysOfWeek {
        self.days
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn interval(self) -> u32 {
        self.interval
    }

    pub(super) fn cursor(self, start: NaiveDate) -> YearlyCursor {
        let mut years = YearCounter::new(start.year(), self.interval);
        if start.month() > self.month {
            years.advance();
        }
        YearlyCursor {
            rule: YearRule::Week(self),
            years,
            start,
            first: true,
            done: self.days.is_empty(),
        }
    }

    fn date_in(self, year: i32) -> Option<NaiveDate> {
        super::pick_weekday(self.week_of_month, self.days, self.month, year)
    }
}

#[derive(Debug, Clone, Copy)]
struct YearCounter {
    year: i64,
    step: i64,
}

impl YearCounter {
    fn new(year: i32, interval: u32) -> Self {
        Self {
            year: i64::from(year),
            step: i64::from(interval),
        }
    }

    fn advance(&mut self) {
        self.year += self.step;
    }

    fn current(self) -> Option<i32> {
        i32::try_from(self.year).ok().filter(|year| *year <= MAX_YEAR)
    }
}

#[derive(Debug, Clone, Copy)]
enum YearRule {
    Day(YearlyByDay),
    MonthDay(YearlyByMonthDay),
    Week(YearlyByWeek),
}

impl YearRule {
    fn date_in(self, year: i32) -> Option<NaiveDate> {
        match self {
            Self::Day(rule) => rule.date_in(year),
            Self::MonthDay(rule) => rule.date_in(year),
            Self::Week(rule) => rule.date_in(year),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Day(_) => "yearly by day",
            Self::MonthDay(_) => "yearly by month day",
            Self::Week(_) => "yearly by week",
        }
    }
}

/// Shared cursor for the yearly patterns: one candidate per stepped year,
/// skipping years where the rule has no date.
#[derive(Debug, Clone)]
pub(super) struct YearlyCursor {
    rule: YearRule,
    years: YearCounter,
    start: NaiveDate,
    /// Whether the first candidate still has to be checked against `start`.
    first: bool,
    done: bool,
}

impl Iterator for YearlyCursor {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while !self.done {
            let Some(year) = self.years.current() else {
                self.done = true;
                super::range_exhausted(self.rule.name());
                break;
            };
            self.years.advance();

            let first = std::mem::replace(&mut self.first, false);
            match self.rule.date_in(year) {
                Some(date) if first && date < self.start => {}
                Some(date) => return Some(date),
                None => tracing::trace!(year, rule = self.rule.name(), "No date this year, skipping"),
            }
        }
        None
    }
}
