use std::fs::File;
use std::io::{BufRead, Read, Write};

use anyhow::{Context, Result};
use trove_core::config::Settings;
use trove_text::KmpMatcher;

use crate::cli::SearchArgs;

fn print_matches<R: Read>(matcher: &KmpMatcher, reader: R, buffer_size: usize, out: &mut impl Write) -> Result<usize> {
    let mut found = 0;
    for index in matcher.search_in_reader(reader, buffer_size)? {
        writeln!(out, "{}", index?)?;
        found += 1;
    }
    Ok(found)
}

pub(super) fn run(args: &SearchArgs, settings: &Settings, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let matcher = KmpMatcher::new(args.target.as_str())?;
    let buffer_size = args.buffer_size.unwrap_or(settings.search.buffer_size);

    let found = if let Some(text) = &args.text {
        let mut found = 0;
        for index in matcher.search_in(text) {
            writeln!(out, "{index}")?;
            found += 1;
        }
        found
    } else if let Some(path) = &args.file {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        print_matches(&matcher, file, buffer_size, out)?
    } else {
        print_matches(&matcher, input, buffer_size, out)?
    };

    tracing::debug!(pattern = %args.target, found, buffer_size, "Search finished");
    Ok(())
}
