use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use trove_dates::{Moment, RecurrencePattern};

use crate::cli::{PatternKind, RecurArgs};

/// Start values keep whatever precision the user gave.
#[derive(Debug)]
enum Start {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
    Date(NaiveDate),
}

fn parse_start(value: &str) -> Result<Start> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
        return Ok(Start::Zoned(zoned));
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Start::Local(local));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Start::Date(date));
    }
    bail!("`{value}` is not an RFC 3339 timestamp, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD")
}

fn required<T>(value: Option<T>, flag: &str, kind: PatternKind) -> Result<T> {
    value.with_context(|| format!("{flag} is required for {kind:?} patterns"))
}

fn build_pattern(args: &RecurArgs) -> Result<RecurrencePattern> {
    let kind = args.kind;
    let interval = args.interval;
    let pattern = match kind {
        PatternKind::Daily => RecurrencePattern::daily(interval)?,
        PatternKind::Weekly => {
            RecurrencePattern::weekly(required(args.days, "--days", kind)?, interval, args.first_day)?
        }
        PatternKind::MonthlyDay => {
            RecurrencePattern::monthly_by_day(required(args.day, "--day", kind)?, interval)?
        }
        PatternKind::MonthlyWeek => RecurrencePattern::monthly_by_week(
            required(args.week, "--week", kind)?,
            required(args.days, "--days", kind)?,
            interval,
        )?,
        PatternKind::YearlyDay => {
            RecurrencePattern::yearly_by_day(required(args.day, "--day", kind)?, interval)?
        }
        PatternKind::YearlyMonth => RecurrencePattern::yearly_by_month_day(
            required(args.month, "--month", kind)?,
            required(args.day, "--day", kind)?,
            interval,
        )?,
        PatternKind::YearlyWeek => RecurrencePattern::yearly_by_week(
            required(args.week, "--week", kind)?,
            required(args.days, "--days", kind)?,
            required(args.month, "--month", kind)?,
            interval,
        )?,
    };
    Ok(pattern)
}

fn print_occurrences<M: Moment>(
    pattern: &RecurrencePattern,
    start: M,
    count: usize,
    out: &mut impl Write,
    format: impl Fn(&M) -> String,
) -> Result<()> {
    for occurrence in pattern.recurrences_from(start).take(count) {
        writeln!(out, "{}", format(&occurrence))?;
    }
    Ok(())
}

pub(super) fn run(args: &RecurArgs, out: &mut impl Write) -> Result<()> {
    let pattern = build_pattern(args)?;
    let start = parse_start(&args.start)?;
    tracing::debug!(%pattern, start = ?start, count = args.count, "Expanding recurrence");

    match start {
        Start::Zoned(start) => print_occurrences(&pattern, start, args.count, out, DateTime::to_rfc3339),
        Start::Local(start) => print_occurrences(&pattern, start, args.count, out, |value| {
            value.format("%Y-%m-%dT%H:%M:%S").to_string()
        }),
        Start::Date(start) => print_occurrences(&pattern, start, args.count, out, ToString::to_string),
    }
}
