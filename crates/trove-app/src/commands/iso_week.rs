use std::io::Write;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use trove_dates::DateExt;
use trove_dates::calendar::{parse_iso8601, weeks_in_year};

use crate::cli::IsoWeekArgs;

pub(super) fn run(args: &IsoWeekArgs, out: &mut impl Write) -> Result<()> {
    let value = args.value.trim();
    let date = if value.contains(['W', 'w']) {
        parse_iso8601(value)?
    } else if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        date
    } else {
        bail!("`{value}` is neither YYYY-MM-DD nor YYYY-Www-D");
    };

    let (iso_year, _, _) = date.to_iso8601();
    writeln!(out, "date: {date}")?;
    writeln!(out, "iso week date: {}", date.format_iso8601())?;
    writeln!(out, "weeks in {iso_year}: {}", weeks_in_year(iso_year)?)?;
    Ok(())
}
