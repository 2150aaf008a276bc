use anyhow::Result;
use cadence_core::recurrence::next_date_str;
use chrono::NaiveDate;

use crate::cli::NextDateCommand;
use crate::parser::parse_today;

/// Prints the next date of `--repeat` after `--now`, anchored at `--date`.
/// Needs no database.
pub fn next_date(command: NextDateCommand, today: NaiveDate) -> Result<()> {
    let now = match command.now.as_deref() {
        Some(text) => parse_today(text)?,
        None => today,
    };
    println!("{}", next_date_str(now, &command.date, &command.repeat)?);
    Ok(())
}
