use chrono::{Datelike, Months, NaiveDate};

use crate::error::CoreError;

/// Fixed-width storage and wire format for task dates.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Date format accepted by the task search (`DD.MM.YYYY`).
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a `YYYYMMDD` date.
///
/// The text must be exactly eight ASCII digits and name a real calendar day,
/// so `20240230` and `2024-3-1` are both rejected.
pub fn parse_date(text: &str) -> Result<NaiveDate, CoreError> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(text.to_string()))
}

/// Format a date as `YYYYMMDD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `DD.MM.YYYY` search term. Returns `None` when the text is not a date.
pub fn parse_search_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, SEARCH_DATE_FORMAT).ok()
}

/// Number of the last day in the given month (28..=31).
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
}

/// The first day of the month following `date`.
pub fn first_day_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(1))
}

/// Shifts `date` by whole years. A Feb 29 that lands in a common year rolls
/// over to Mar 1.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let year = date.year().checked_add(i32::try_from(years).ok()?)?;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// ISO weekday number, Monday = 1 through Sunday = 7.
#[inline]
pub fn iso_weekday(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}
