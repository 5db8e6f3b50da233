//! Week-of-month ordinals.

use std::fmt;

use trove_core::error::CoreError;

/// Which week of a month an occurrence falls in.
///
/// `Last` is not a fixed offset: it resolves to the fourth or fifth week
/// depending on how the month's days fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekOfMonth {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    Last = 5,
}

impl WeekOfMonth {
    /// Returns the ordinal (`1..=5`).
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Maps a one-based week row to an ordinal, folding rows past the fourth
    /// into `Last`.
    #[must_use]
    pub const fn from_row(row: u32) -> Self {
        match row {
            0 | 1 => Self::First,
            2 => Self::Second,
            3 => Self::Third,
            4 => Self::Fourth,
            _ => Self::Last,
        }
    }

    /// Returns all ordinals in ascending order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::First,
            Self::Second,
            Self::Third,
            Self::Fourth,
            Self::Last,
        ]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Last => "last",
        }
    }
}

impl TryFrom<u8> for WeekOfMonth {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=5 => Ok(Self::from_row(u32::from(value))),
            _ => Err(CoreError::OutOfRange {
                param: "week_of_month",
                value: i64::from(value),
                expected: "1..=5".to_string(),
            }),
        }
    }
}

impl std::str::FromStr for WeekOfMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|week| week.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::invalid_argument(
                    "week_of_month",
                    format!("`{s}` is not one of first, second, third, fourth, last"),
                )
            })
    }
}

impl fmt::Display for WeekOfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals() {
        assert_eq!(WeekOfMonth::First.ordinal(), 1);
        assert_eq!(WeekOfMonth::Last.ordinal(), 5);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(WeekOfMonth::try_from(3).unwrap(), WeekOfMonth::Third);
        assert_eq!(WeekOfMonth::try_from(5).unwrap(), WeekOfMonth::Last);
        assert!(WeekOfMonth::try_from(0).is_err());
        assert!(WeekOfMonth::try_from(6).is_err());
    }

    #[test]
    fn test_from_row_folds_sixth_row() {
        assert_eq!(WeekOfMonth::from_row(6), WeekOfMonth::Last);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Last".parse::<WeekOfMonth>().unwrap(), WeekOfMonth::Last);
        assert_eq!(" second ".parse::<WeekOfMonth>().unwrap(), WeekOfMonth::Second);
        assert!("fifth".parse::<WeekOfMonth>().is_err());
    }
}
