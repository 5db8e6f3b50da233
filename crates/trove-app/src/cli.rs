use std::path::PathBuf;

use chrono::Weekday;
use clap::{Args, Parser, Subcommand, ValueEnum};
use trove_dates::{DaysOfWeek, WeekOfMonth};

/// Recurrence dates, substring search and string similarity.
#[derive(Parser, Debug)]
#[command(name = "trove", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the first occurrences of a recurrence pattern
    Recur(RecurArgs),

    /// Print the byte offset of every occurrence of a target string
    Search(SearchArgs),

    /// Compare two strings with every similarity metric
    Similarity(SimilarityArgs),

    /// Convert between calendar dates and ISO-8601 week dates
    IsoWeek(IsoWeekArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Daily,
    Weekly,
    MonthlyDay,
    MonthlyWeek,
    YearlyDay,
    YearlyMonth,
    YearlyWeek,
}

#[derive(Args, Debug)]
pub struct RecurArgs {
    #[arg(value_enum)]
    pub kind: PatternKind,

    /// First candidate: RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`
    #[arg(long)]
    pub start: String,

    /// Number of occurrences to print
    #[arg(long, default_value_t = 10)]
    pub count: usize,

    /// Step between periods, in the pattern's unit
    #[arg(long, default_value_t = 1)]
    pub interval: u32,

    /// Weekdays, e.g. `mon,wed`, `weekdays` or `weekend`
    #[arg(long)]
    pub days: Option<DaysOfWeek>,

    /// First day of the week for weekly patterns
    #[arg(long, default_value = "mon")]
    pub first_day: Weekday,

    /// Day of the month, or of the year for `yearly-day`
    #[arg(long)]
    pub day: Option<u32>,

    /// Month of the year (1-12)
    #[arg(long)]
    pub month: Option<u32>,

    /// Week of the month: first, second, third, fourth or last
    #[arg(long)]
    pub week: Option<WeekOfMonth>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// String to look for
    pub target: String,

    /// Search this file instead of standard input
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Search this text instead of standard input
    #[arg(long)]
    pub text: Option<String>,

    /// Read size for file and stdin searches
    #[arg(long)]
    pub buffer_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SimilarityArgs {
    pub a: String,
    pub b: String,
}

#[derive(Args, Debug)]
pub struct IsoWeekArgs {
    /// A calendar date (`2008-12-31`) or an ISO week date (`2009-W01-3`)
    pub value: String,
}
