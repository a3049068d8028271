// Date range model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::date::compare_days;

/// A `(from, to)` pair.
///
/// Callers keep `from <= to`; the range never swaps its endpoints. Whether
/// `to` is inclusive depends on use: view ranges are half-open, the covered
/// days of an item are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange<T> {
    pub from: T,
    pub to: T,
}

/// Day resolution range
pub type DayRange = DateRange<NaiveDate>;

/// Timestamp resolution range
pub type TimeRange = DateRange<NaiveDateTime>;

impl<T: PartialOrd + Copy> DateRange<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    /// Half-open containment: `from <= value < to`
    pub fn contains(&self, value: T) -> bool {
        self.from <= value && value < self.to
    }

    /// Closed containment: `from <= value <= to`
    pub fn contains_inclusive(&self, value: T) -> bool {
        self.from <= value && value <= self.to
    }
}

impl DayRange {
    /// Number of days between `from` and `to`.
    pub fn num_days(&self) -> i64 {
        compare_days(self.to, self.from)
    }
}
