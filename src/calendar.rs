//! Calendar helpers for stay expansion: range enumeration, weekend and
//! inspection-day tests, display formatting.

use chrono::{Datelike, NaiveDate, Weekday};

/// All dates in `[start, end]`, inclusive, ascending, daily step.
///
/// Defensive policy: a reversed range yields an empty vector. Callers
/// validate admission ≤ discharge before reaching this point.
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut curr = start;
    while curr <= end {
        dates.push(curr);
        match curr.succ_opt() {
            Some(next) => curr = next,
            None => break,
        }
    }
    dates
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday or Friday — the days the head of department co-signs the entry.
pub fn is_inspection_day(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Mon | Weekday::Fri)
}

/// "DD.MM.YYYY"
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
