use std::fmt::Display;
use std::ops::RangeInclusive;

use thiserror::Error;

/// Core-level errors shared by every trove crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Argument `{param}` is out of range: got {value}, expected {expected}")]
    OutOfRange {
        param: &'static str,
        value: i64,
        expected: String,
    },

    #[error("Invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Creates an [`CoreError::InvalidArgument`] for the named parameter.
    #[must_use]
    pub fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending parameter, if the error concerns one.
    #[must_use]
    pub const fn param(&self) -> Option<&'static str> {
        match self {
            Self::OutOfRange { param, .. } | Self::InvalidArgument { param, .. } => Some(param),
            Self::Config(_) => None,
        }
    }
}

/// ## Summary
/// Checks that `value` lies within the inclusive `range`.
///
/// ## Errors
/// Returns [`CoreError::OutOfRange`] naming `param` and the valid range.
pub fn ensure_in_range<T>(param: &'static str, value: T, range: RangeInclusive<T>) -> CoreResult<()>
where
    T: PartialOrd + Copy + Display + Into<i64>,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::OutOfRange {
            param,
            value: value.into(),
            expected: format!("{}..={}", range.start(), range.end()),
        })
    }
}

/// ## Summary
/// Checks that `value` is at least `min`.
///
/// ## Errors
/// Returns [`CoreError::OutOfRange`] naming `param` and the lower bound.
pub fn ensure_at_least<T>(param: &'static str, value: T, min: T) -> CoreResult<()>
where
    T: PartialOrd + Copy + Display + Into<i64>,
{
    if value >= min {
        Ok(())
    } else {
        Err(CoreError::OutOfRange {
            param,
            value: value.into(),
            expected: format!(">= {min}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_accepts_bounds() {
        assert!(ensure_in_range("month", 1u32, 1..=12).is_ok());
        assert!(ensure_in_range("month", 12u32, 1..=12).is_ok());
    }

    #[test]
    fn test_out_of_range_names_param() {
        let err = ensure_in_range("month", 13u32, 1..=12).unwrap_err();
        assert_eq!(err.param(), Some("month"));
        assert_eq!(
            err.to_string(),
            "Argument `month` is out of range: got 13, expected 1..=12"
        );
    }

    #[test]
    fn test_at_least() {
        assert!(ensure_at_least("interval", 1u32, 1).is_ok());
        let err = ensure_at_least("interval", 0u32, 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::OutOfRange {
                param: "interval",
                value: 0,
                ..
            }
        ));
        assert!(err.to_string().contains(">= 1"));
    }

    #[test]
    fn test_negative_values_are_reported() {
        let err = ensure_in_range("year", -2018i32, 1..=9999).unwrap_err();
        assert!(err.to_string().contains("got -2018"));
    }
}
