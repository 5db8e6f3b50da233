mod iso_week;
mod recur;
mod search;
mod similarity;

use std::io::{BufRead, Write};

use anyhow::Result;
use trove_core::config::Settings;

use crate::cli::{Cli, Command};

/// ## Summary
/// Executes a parsed command line, writing results to `out`.
///
/// `input` is read only by `search` when neither `--file` nor `--text` is
/// given.
///
/// ## Errors
/// Returns an error if arguments are invalid for the chosen command or if
/// reading input or writing output fails.
pub fn run(cli: Cli, settings: &Settings, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    tracing::debug!(command = ?cli.command, "Running command");

    match cli.command {
        Command::Recur(args) => recur::run(&args, out),
        Command::Search(args) => search::run(&args, settings, input, out),
        Command::Similarity(args) => similarity::run(&args, settings, out),
        Command::IsoWeek(args) => iso_week::run(&args, out),
    }
}
