//! Calendar helpers for service and age calculations

use chrono::{Datelike, NaiveDate};

/// Whole years elapsed from `start` to `end`.
///
/// The anniversary day itself counts as a complete year. Returns 0 when `end`
/// precedes `start`.
pub fn complete_years(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut years = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Same calendar day `years` later; 29 February rolls to 1 March in non-leap years.
///
/// Dates past the end of the calendar range are returned unchanged.
pub fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    let target = date.year() + years as i32;
    date.with_year(target)
        .or_else(|| NaiveDate::from_ymd_opt(target, 3, 1))
        .unwrap_or(date)
}

/// Format as M/D/YYYY, as shown in projection tables
pub fn format_us(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
