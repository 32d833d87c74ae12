//! Calendar for the panel: a fixed daily range and the day-of-year helper.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Every day from `start` to `start + 7 * weeks`, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub weeks: u32,
}

impl DateRange {
    pub fn new(start: NaiveDate, weeks: u32) -> Self {
        Self { start, weeks }
    }

    /// Last day of the range, or None if it falls off the calendar.
    pub fn checked_end(&self) -> Option<NaiveDate> {
        self.start.checked_add_days(Days::new(u64::from(self.weeks) * 7))
    }

    /// Last day of the range. Panics on overflow; configs are validated first.
    pub fn end(&self) -> NaiveDate {
        self.checked_end().expect("date range overflows the calendar")
    }

    /// Number of days, counting both ends.
    pub fn len(&self) -> usize {
        self.weeks as usize * 7 + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.len())
    }
}

/// 1-based day of the year (1 January is 1).
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}
