use anyhow::{anyhow, Result};
use cadence_core::date::{format_date, parse_date};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_english::{parse_date_string, Dialect};

/// Accepts either a stored-format date (`YYYYMMDD`) or an English expression
/// such as `tomorrow` or `next friday`, relative to `today`.
///
/// The result is always in stored format. Empty input stays empty so the core
/// can apply its own defaulting.
pub fn parse_date_arg(input: &str, today: NaiveDate) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(String::new());
    }
    if input.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(format_date(parse_date(input)?));
    }

    let base = Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN));
    parse_date_string(input, base, Dialect::Us)
        .map(|parsed| format_date(parsed.date_naive()))
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

/// Parses the global `--today` override, which only accepts `YYYYMMDD`.
pub fn parse_today(input: &str) -> Result<NaiveDate> {
    Ok(parse_date(input.trim())?)
}
