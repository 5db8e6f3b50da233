use chrono::{Days, NaiveDate};

use crate::calendar::max_date;

/// Every `interval` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Daily {
    pub(super) interval: u32,
}

impl Daily {
    #[must_use]
    pub const fn interval(self) -> u32 {
        self.interval
    }

    pub(super) fn cursor(self, start: NaiveDate) -> DailyCursor {
        DailyCursor {
            next: Some(start).filter(|date| *date <= max_date()),
            step: Days::new(u64::from(self.interval)),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct DailyCursor {
    next: Option<NaiveDate>,
    step: Days,
}

impl Iterator for DailyCursor {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current
            .checked_add_days(self.step)
            .filter(|date| *date <= max_date());
        if self.next.is_none() {
            super::range_exhausted("daily");
        }
        Some(current)
    }
}
