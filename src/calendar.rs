//! Calendar arithmetic for page navigation.
//!
//! Thin helpers over [`chrono::NaiveDate`]. All month values are 1-based.

use chrono::{Datelike, NaiveDate};

/// A calendar month in a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

/// Number of days in `month` of `year`: the day before the 1st of the
/// following month.
///
/// Returns 0 for a month outside 1..=12 or a year chrono cannot represent.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = YearMonth::new(year, month).next();
    NaiveDate::from_ymd_opt(next.year, next.month, 1)
        .and_then(|first| first.pred_opt())
        .filter(|_| (1..=12).contains(&month))
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Every date of `month` in `year`, in order.
pub fn month_dates(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    (1..=days_in_month(year, month)).filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
}

/// The previous calendar day, rolling over month and year boundaries.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// The next calendar day, rolling over month and year boundaries.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
