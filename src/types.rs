//! Shared types used across pipeline stages.

use chrono::NaiveDate;
use std::fmt;

/// The "last updated" date printed on every day and month page.
///
/// This is the only input of a build that changes from run to run. The
/// binary stamps a run with [`BuildStamp::today`]; tests construct a fixed
/// stamp so output can be compared byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStamp(pub NaiveDate);

impl BuildStamp {
    /// Today's date in UTC.
    pub fn today() -> Self {
        Self(chrono::Utc::now().date_naive())
    }
}

impl fmt::Display for BuildStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
