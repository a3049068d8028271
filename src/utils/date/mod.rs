// Date utility functions
// Local-date arithmetic shared by ranges, layout and drag

use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, Timelike, Weekday};

/// Signed number of days from `b` to `a` (positive when `a` is later).
pub fn compare_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}

/// Shift a date by a signed number of days, `None` on calendar overflow.
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// Shift a date by a signed number of months.
///
/// The day of month is clamped to the length of the target month, so
/// Jan 31 + 1 month is Feb 28 (or 29).
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let magnitude = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - The weekday that opens a week
pub fn week_start(date: NaiveDate, first_day_of_week: Weekday) -> Option<NaiveDate> {
    let weekday = date.weekday().num_days_from_monday() as i64;
    let first = first_day_of_week.num_days_from_monday() as i64;
    let offset = (weekday - first + 7) % 7;
    shift_days(date, -offset)
}

pub fn monday_on_or_before(date: NaiveDate) -> Option<NaiveDate> {
    week_start(date, Weekday::Mon)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // day0 is at most 30, which can never leave the supported range
    date - Days::new(u64::from(date.day0()))
}

pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    shift_months(first_of_month(date), 1)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> Option<i64> {
    let next = first_of_next_month(date)?;
    Some(compare_days(next, first_of_month(date)))
}

/// ISO 8601 week number (1..=53) used for the month grid gutter.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}
