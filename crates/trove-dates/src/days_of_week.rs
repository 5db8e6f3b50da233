//! A compact set of weekdays.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use chrono::Weekday;
use trove_core::error::CoreError;

use crate::calendar::MONDAY_FIRST;

/// ## Summary
/// A set of weekdays stored as seven bit flags, Monday in the lowest bit.
///
/// Sets combine with `|`, intersect with `&` and iterate Monday first.
/// Bits above the seventh are never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaysOfWeek(u8);

impl DaysOfWeek {
    pub const NONE: Self = Self(0);
    pub const MONDAY: Self = Self(1 << 0);
    pub const TUESDAY: Self = Self(1 << 1);
    pub const WEDNESDAY: Self = Self(1 << 2);
    pub const THURSDAY: Self = Self(1 << 3);
    pub const FRIDAY: Self = Self(1 << 4);
    pub const SATURDAY: Self = Self(1 << 5);
    pub const SUNDAY: Self = Self(1 << 6);
    pub const WEEKDAYS: Self = Self(0b001_1111);
    pub const WEEKEND: Self = Self(0b110_0000);
    pub const ANY: Self = Self(0b111_1111);

    /// Builds a set from raw bits, discarding anything above Sunday.
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ANY.0)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of weekdays in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if every day of `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn contains_day(self, day: Weekday) -> bool {
        self.contains(Self::from_weekday(day))
    }

    #[must_use]
    pub fn from_weekday(day: Weekday) -> Self {
        Self(1u8 << day.num_days_from_monday())
    }

    /// Iterates the selected weekdays from Monday to Sunday.
    #[must_use]
    pub const fn iter(self) -> Iter {
        Iter { days: self, next: 0 }
    }
}

impl From<Weekday> for DaysOfWeek {
    fn from(day: Weekday) -> Self {
        Self::from_weekday(day)
    }
}

impl FromIterator<Weekday> for DaysOfWeek {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::NONE, |days, day| days | Self::from(day))
    }
}

impl IntoIterator for DaysOfWeek {
    type Item = Weekday;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Iterator over the weekdays of a [`DaysOfWeek`], Monday first.
#[derive(Debug, Clone)]
pub struct Iter {
    days: DaysOfWeek,
    next: usize,
}

impl Iterator for Iter {
    type Item = Weekday;

    fn next(&mut self) -> Option<Weekday> {
        while let Some(&day) = MONDAY_FIRST.get(self.next) {
            self.next += 1;
            if self.days.contains_day(day) {
                return Some(day);
            }
        }
        None
    }
}

impl BitOr for DaysOfWeek {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DaysOfWeek {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for DaysOfWeek {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for DaysOfWeek {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for DaysOfWeek {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits_truncate(!self.0)
    }
}

impl std::str::FromStr for DaysOfWeek {
    type Err = CoreError;

    /// Parses a comma-separated list of weekday names (`mon,wed`) or one of
    /// the named groups `weekdays`, `weekend`, `any`, `none`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut days = Self::NONE;
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            days |= match part.to_ascii_lowercase().as_str() {
                "weekdays" | "weekday" => Self::WEEKDAYS,
                "weekend" => Self::WEEKEND,
                "any" | "all" => Self::ANY,
                "none" => Self::NONE,
                other => other.parse::<Weekday>().map(Self::from).map_err(|err| {
                    CoreError::invalid_argument("days_of_week", format!("`{part}`: {err}"))
                })?,
            };
        }
        Ok(days)
    }
}

impl fmt::Display for DaysOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no days");
        }
        let mut first = true;
        for day in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{day}")?;
            first = false;
        }
        Ok(())
    }
}
