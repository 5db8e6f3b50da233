use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::calendar::{DAYS_PER_WEEK, days_from_start_of_week, max_date};
use crate::days_of_week::DaysOfWeek;

/// Selected weekdays of every `interval`-th week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Weekly {
    pub(super) days: DaysOfWeek,
    pub(super) interval: u32,
    pub(super) first_day_of_week: Weekday,
}

impl Weekly {
    #[must_use]
    pub const fn days(self) -> DaysOfWeek {
        self.days
    }

    #[must_use]
    pub const fn interval(self) -> u32 {
        self.interval
    }

    #[must_use]
    pub const fn first_day_of_week(self) -> Weekday {
        self.first_day_of_week
    }

    /// Offsets of the selected weekdays from `start`, measured inside the
    /// week that contains it. Days earlier in that week are negative.
    fn offsets_from(&self, start: NaiveDate) -> Vec<i64> {
        let start_offset = i64::from(days_from_start_of_week(start.weekday(), self.first_day_of_week));
        let mut offsets: Vec<i64> = self
            .days
            .iter()
            .map(|day| i64::from(days_from_start_of_week(day, self.first_day_of_week)) - start_offset)
            .collect();
        offsets.sort_unstable();
        offsets
    }

    pub(super) fn cursor(self, start: NaiveDate) -> WeeklyCursor {
        WeeklyCursor {
            start,
            offsets: self.offsets_from(start),
            week: 0,
            step: i64::from(self.interval) * i64::from(DAYS_PER_WEEK),
            position: 0,
            done: self.days.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct WeeklyCursor {
    start: NaiveDate,
    offsets: Vec<i64>,
    /// Days from `start` to the current cycle's copy of it.
    week: i64,
    step: i64,
    position: usize,
    done: bool,
}

impl Iterator for WeeklyCursor {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while !self.done {
            let Some(&offset) = self.offsets.get(self.position) else {
                self.position = 0;
                self.week += self.step;
                continue;
            };
            self.position += 1;

            // The first cycle only yields days on or after the start.
            if self.week == 0 && offset < 0 {
                continue;
            }

            let date = self
                .start
                .checked_add_signed(TimeDelta::days(self.week + offset))
                .filter(|date| *date <= max_date());
            if date.is_none() {
                self.done = true;
                super::range_exhausted("weekly");
            }
            return date;
        }
        None
    }
}
