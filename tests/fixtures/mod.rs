// Test fixtures - reusable test data
// Provides consistent dates and items across all test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, June 22 2016
    pub fn mid_june_2016() -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 6, 22).unwrap()
    }

    /// Monday, August 1 2016 (month starting on a Monday)
    pub fn aug_1_2016() -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 8, 1).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample items for testing
pub mod items {
    use super::dates::{at, mid_june_2016};
    use calendar_engine::models::item::{ItemId, ScheduledItem};

    pub fn timed(id: i64, title: &str, from: (u32, u32), to: (u32, u32)) -> ScheduledItem {
        let day = mid_june_2016();
        ScheduledItem::new(ItemId(id), title, at(day, from.0, from.1), at(day, to.0, to.1)).unwrap()
    }

    /// A busy Wednesday with a mix of overlapping meetings
    pub fn busy_day() -> Vec<ScheduledItem> {
        vec![
            timed(1, "Standup", (9, 0), (9, 15)),
            timed(2, "Design review", (9, 0), (10, 30)),
            timed(3, "Pairing", (10, 0), (12, 0)),
            timed(4, "Lunch", (12, 0), (13, 0)),
            timed(5, "Interview", (12, 30), (13, 30)),
        ]
    }

    pub fn holiday() -> ScheduledItem {
        let day = mid_june_2016();
        ScheduledItem::builder()
            .id(10)
            .title("Holiday")
            .start(at(day, 0, 0))
            .end(at(day.succ_opt().unwrap(), 0, 0))
            .all_day(true)
            .build()
            .unwrap()
    }

    /// Overnight item spanning two days
    pub fn night_shift() -> ScheduledItem {
        let day = mid_june_2016();
        ScheduledItem::new(
            ItemId(20),
            "Night shift",
            at(day, 22, 0),
            at(day.succ_opt().unwrap(), 6, 0),
        )
        .unwrap()
    }
}
