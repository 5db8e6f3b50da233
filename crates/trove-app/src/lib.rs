//! The `trove` command-line tool.

pub mod cli;
pub mod commands;

pub use cli::Cli;
pub use commands::run;
