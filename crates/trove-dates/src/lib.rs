//! Calendar arithmetic and recurrence patterns.
//!
//! The calendar functions cover day-of-week offsets, week-of-month lookups and
//! ISO-8601 week dates. The recurrence engine turns a [`RecurrencePattern`]
//! into a lazy, restartable sequence of occurrences that keeps the start
//! value's time of day and zone.

pub mod calendar;
pub mod days_of_week;
pub mod error;
pub mod moment;
pub mod recurrence;
pub mod week_of_month;

pub use calendar::DateExt;
pub use days_of_week::DaysOfWeek;
pub use error::{DateError, DateResult};
pub use moment::Moment;
pub use recurrence::{RecurrencePattern, Recurrences};
pub use week_of_month::WeekOfMonth;
