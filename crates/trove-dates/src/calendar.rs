//! Calendar primitives: weekday offsets, month and year lengths, week-of-month
//! lookups and ISO-8601 week dates.
//!
//! Dates are proleptic Gregorian [`NaiveDate`] values. Functions that accept a
//! year validate it against [`MIN_YEAR`]`..=`[`MAX_YEAR`], the range the
//! recurrence engine treats as representable.

use chrono::{Datelike, Days, NaiveDate, TimeDelta, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use trove_core::error::{CoreError, ensure_in_range};

use crate::error::{DateError, DateResult};
use crate::week_of_month::WeekOfMonth;

pub const DAYS_PER_WEEK: u32 = 7;

/// Earliest year accepted by the validating calendar functions.
pub const MIN_YEAR: i32 = 1;

/// Latest representable year. Recurrence sequences end silently past it.
pub const MAX_YEAR: i32 = 9999;

/// Weekdays in ISO order.
pub const MONDAY_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[expect(clippy::expect_used, reason = "the pattern is a literal")]
static ISO_WEEK_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-[wW](\d{2})-([1-7])$").expect("ISO week date pattern compiles")
});

/// Returns the last representable date, `9999-12-31`.
#[must_use]
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX)
}

#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Returns the number of days in `month` of `year`, or 0 for an invalid month.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

#[must_use]
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// ## Summary
/// Returns how many days `day` lies after `first_day_of_week`, in `0..=6`.
#[must_use]
pub fn days_from_start_of_week(day: Weekday, first_day_of_week: Weekday) -> u32 {
    (DAYS_PER_WEEK + day.num_days_from_monday() - first_day_of_week.num_days_from_monday())
        % DAYS_PER_WEEK
}

/// ## Summary
/// Returns the weekday `days` days after the start of a week beginning on
/// `first_day_of_week`. Negative and out-of-week offsets wrap.
#[must_use]
pub fn weekday_after(days: i64, first_day_of_week: Weekday) -> Weekday {
    let index = (i64::from(first_day_of_week.num_days_from_monday()) + days)
        .rem_euclid(i64::from(DAYS_PER_WEEK));
    MONDAY_FIRST[usize::try_from(index).unwrap_or_default()]
}

/// Finds the `week`-th `weekday` of a month without range checks.
///
/// `Last` steps back a week when the fifth candidate would spill into the
/// following month.
pub(crate) fn nth_weekday_in_month(
    week: WeekOfMonth,
    weekday: Weekday,
    month: u32,
    year: i32,
) -> Option<NaiveDate> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let mut offset = days_from_start_of_week(weekday, first_of_month.weekday())
        + (week.ordinal() - 1) * DAYS_PER_WEEK;
    if week == WeekOfMonth::Last && offset >= days_in_month(year, month) {
        offset -= DAYS_PER_WEEK;
    }
    first_of_month.checked_add_days(Days::new(u64::from(offset)))
}

/// ## Summary
/// Returns the date of the `week`-th `weekday` in `month` of `year`.
///
/// `WeekOfMonth::Last` resolves to the final occurrence of the weekday in the
/// month, which may be its fourth or fifth appearance.
///
/// ## Errors
/// Returns an out-of-range error if `year` is outside `1..=9999` or `month`
/// is outside `1..=12`.
pub fn date_for(
    week: WeekOfMonth,
    weekday: Weekday,
    month: u32,
    year: i32,
) -> DateResult<NaiveDate> {
    ensure_in_range("year", year, MIN_YEAR..=MAX_YEAR)?;
    ensure_in_range("month", month, 1..=12)?;

    nth_weekday_in_month(week, weekday, month, year)
        .ok_or_else(|| CoreError::invalid_argument("year", "date is not representable").into())
}

/// Counts ISO-8601 weeks without validating the year.
pub(crate) fn iso_weeks(year: i32) -> u32 {
    let Some(new_year) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return 52;
    };
    match new_year.weekday() {
        Weekday::Thu => 53,
        Weekday::Wed if is_leap_year(year) => 53,
        _ => 52,
    }
}

/// ## Summary
/// Returns the number of ISO-8601 weeks in `year`: 53 when January 1st is a
/// Thursday, or a Wednesday in a leap year, otherwise 52.
///
/// ## Errors
/// Returns an out-of-range error if `year` is outside `1..=9999`.
pub fn weeks_in_year(year: i32) -> DateResult<u32> {
    ensure_in_range("year", year, MIN_YEAR..=MAX_YEAR)?;
    Ok(iso_weeks(year))
}

/// ## Summary
/// Converts an ISO-8601 year, week and weekday to a calendar date.
///
/// Week 53 of a year that only has 52 weeks rolls over into the first week of
/// the following year.
///
/// ## Errors
/// Returns an out-of-range error if `year` is outside `1..=9999` or `week` is
/// outside `1..=53`.
pub fn date_for_iso8601(year: i32, week: u32, weekday: Weekday) -> DateResult<NaiveDate> {
    ensure_in_range("year", year, MIN_YEAR..=MAX_YEAR)?;
    ensure_in_range("week", week, 1..=53)?;

    let new_year = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| CoreError::invalid_argument("year", "date is not representable"))?;
    let new_year_offset = i64::from(new_year.weekday().num_days_from_monday());

    let mut days = i64::from(weekday.num_days_from_monday()) - new_year_offset
        + i64::from((week - 1) * DAYS_PER_WEEK);
    // Week 1 holds the year's first Thursday.
    if new_year_offset > 3 {
        days += i64::from(DAYS_PER_WEEK);
    }

    new_year
        .checked_add_signed(TimeDelta::days(days))
        .ok_or_else(|| CoreError::invalid_argument("week", "date is not representable").into())
}

/// ## Summary
/// Parses an ISO-8601 week date such as `2009-W01-3`.
///
/// ## Errors
/// Returns [`DateError::Format`] if the text is not in `YYYY-Www-D` form, or
/// the year is 0, or the week is 0 or above 53.
pub fn parse_iso8601(s: &str) -> DateResult<NaiveDate> {
    let format_error = |reason| DateError::Format {
        input: s.to_string(),
        reason,
    };

    let captures = ISO_WEEK_DATE
        .captures(s.trim())
        .ok_or_else(|| format_error("expected the form YYYY-Www-D"))?;

    let year: i32 = captures[1]
        .parse()
        .map_err(|_err| format_error("year is not a number"))?;
    let week: u32 = captures[2]
        .parse()
        .map_err(|_err| format_error("week is not a number"))?;
    let day: i64 = captures[3]
        .parse()
        .map_err(|_err| format_error("weekday is not a number"))?;

    if year == 0 {
        return Err(format_error("year must be at least 1"));
    }
    if week == 0 || week > 53 {
        return Err(format_error("week must be within 1..=53"));
    }

    date_for_iso8601(year, week, weekday_after(day - 1, Weekday::Mon))
}

/// Extension methods for anything that carries a calendar date.
pub trait DateExt: Datelike {
    #[must_use]
    fn is_in_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    #[must_use]
    fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    #[must_use]
    fn days_in_year(&self) -> u32 {
        days_in_year(self.year())
    }

    /// Number of ISO-8601 weeks in this date's calendar year.
    #[must_use]
    fn weeks_in_year(&self) -> u32 {
        iso_weeks(self.year())
    }

    #[must_use]
    fn days_from_start_of_week(&self, first_day_of_week: Weekday) -> u32 {
        days_from_start_of_week(self.weekday(), first_day_of_week)
    }

    /// Returns the calendar row of the month this date sits in, with weeks
    /// starting on `first_day_of_week`. Fifth and sixth rows are `Last`.
    #[must_use]
    fn week_of_month(&self, first_day_of_week: Weekday) -> WeekOfMonth {
        let days_before = self.day() - 1;
        // Offset of the 1st of the month within its week.
        let lead = (self.days_from_start_of_week(first_day_of_week) + DAYS_PER_WEEK
            - days_before % DAYS_PER_WEEK)
            % DAYS_PER_WEEK;
        WeekOfMonth::from_row((days_before + lead) / DAYS_PER_WEEK + 1)
    }

    /// Returns which occurrence of its weekday this date is within the month.
    #[must_use]
    fn day_of_week_instance(&self) -> WeekOfMonth {
        WeekOfMonth::from_row((DAYS_PER_WEEK + self.day() - 1) / DAYS_PER_WEEK)
    }

    /// Returns the ISO-8601 `(year, week, weekday)` triple, weekday `1..=7`
    /// from Monday. The ISO year differs from the calendar year for days
    /// that fall in a week owned by the neighbouring year.
    #[must_use]
    fn to_iso8601(&self) -> (i32, u32, u32) {
        let iso = self.iso_week();
        (iso.year(), iso.week(), self.weekday().number_from_monday())
    }

    /// Formats the date as an ISO-8601 week date, e.g. `2009-W01-3`.
    #[must_use]
    fn format_iso8601(&self) -> String {
        let (year, week, day) = self.to_iso8601();
        format!("{year:04}-W{week:02}-{day}")
    }

    #[must_use]
    fn start_of_week(&self, first_day_of_week: Weekday) -> NaiveDate {
        let days = self.days_from_start_of_week(first_day_of_week);
        naive_date(self)
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN)
    }

    #[must_use]
    fn end_of_week(&self, first_day_of_week: Weekday) -> NaiveDate {
        let days = DAYS_PER_WEEK - 1 - self.days_from_start_of_week(first_day_of_week);
        naive_date(self)
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX)
    }

    #[must_use]
    fn start_of_month(&self) -> NaiveDate {
        naive_date(self).with_day(1).unwrap_or(NaiveDate::MIN)
    }

    #[must_use]
    fn end_of_month(&self) -> NaiveDate {
        let date = naive_date(self);
        date.with_day(days_in_month(date.year(), date.month()))
            .unwrap_or(date)
    }

    #[must_use]
    fn start_of_year(&self) -> NaiveDate {
        naive_date(self).with_ordinal(1).unwrap_or(NaiveDate::MIN)
    }

    #[must_use]
    fn end_of_year(&self) -> NaiveDate {
        let date = naive_date(self);
        date.with_ordinal(days_in_year(date.year())).unwrap_or(date)
    }
}

impl<T: Datelike> DateExt for T {}

fn naive_date<T: Datelike + ?Sized>(value: &T) -> NaiveDate {
    NaiveDate::from_num_days_from_ce_opt(value.num_days_from_ce()).unwrap_or(NaiveDate::MIN)
}
