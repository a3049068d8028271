//! Visible range computation.
//!
//! The *exact* range is the logically selected period; the *view* range is
//! what has to be rendered, which for the month grid means six complete
//! weeks starting on a Monday.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::date_range::DayRange;
use crate::models::display_mode::DisplayMode;
use crate::utils::date::{first_of_month, first_of_next_month, monday_on_or_before, shift_days, shift_months};

/// Weeks shown by the month grid.
pub const MONTH_VIEW_WEEKS: i64 = 6;
/// Days shown by the month grid, and the bound of the view-start search.
pub const MONTH_VIEW_DAYS: i64 = MONTH_VIEW_WEEKS * 7;

/// Navigation direction for the previous / next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn sign(self) -> i32 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Exact and padded range for one mode/anchor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRanges {
    pub exact: DayRange,
    pub view: DayRange,
}

fn overflow(what: &str, anchor: NaiveDate) -> EngineError {
    EngineError::RangeComputation(format!("{what} of {anchor} is outside the supported calendar"))
}

/// Half-open range of the period selected by `anchor` in `mode`.
pub fn compute_exact_range(mode: DisplayMode, anchor: NaiveDate) -> Result<DayRange> {
    let range = match mode {
        DisplayMode::Day => {
            let to = shift_days(anchor, 1).ok_or_else(|| overflow("day after", anchor))?;
            DayRange::new(anchor, to)
        }
        DisplayMode::Week | DisplayMode::WorkWeek => {
            let from = monday_on_or_before(anchor).ok_or_else(|| overflow("week start", anchor))?;
            let length = if mode == DisplayMode::Week { 7 } else { 5 };
            let to = shift_days(from, length).ok_or_else(|| overflow("week end", anchor))?;
            DayRange::new(from, to)
        }
        DisplayMode::Month => {
            let to = first_of_next_month(anchor).ok_or_else(|| overflow("next month", anchor))?;
            DayRange::new(first_of_month(anchor), to)
        }
    };
    log::trace!("exact range for {} at {}: {:?}", mode, anchor, range);
    Ok(range)
}

/// Pad the exact range to whole grid rows.
///
/// Only the month grid is padded: the view starts at the last Monday before
/// `exact.from` that lies in a different month and always spans 42 days.
pub fn compute_padded_view_range(mode: DisplayMode, exact: DayRange) -> Result<DayRange> {
    if !mode.is_month() {
        return Ok(exact);
    }

    let mut day = exact.from;
    for _ in 0..MONTH_VIEW_DAYS {
        day = shift_days(day, -1).ok_or_else(|| overflow("view start", exact.from))?;
        if day.weekday() == Weekday::Mon && day.month() != exact.from.month() {
            let to = shift_days(day, MONTH_VIEW_DAYS).ok_or_else(|| overflow("view end", exact.from))?;
            return Ok(DayRange::new(day, to));
        }
    }

    Err(EngineError::RangeComputation(format!(
        "no view start found within {MONTH_VIEW_DAYS} days before {}",
        exact.from
    )))
}

/// Day columns of `range`, in order.
pub fn visible_days(range: DayRange) -> impl Iterator<Item = NaiveDate> {
    (0..range.num_days().max(0)).filter_map(move |offset| shift_days(range.from, offset))
}

/// Exact and padded range in one call.
pub fn compute_ranges(mode: DisplayMode, anchor: NaiveDate) -> Result<ViewRanges> {
    let exact = compute_exact_range(mode, anchor)?;
    let view = compute_padded_view_range(mode, exact)?;
    log::debug!("ranges for {} at {}: exact {:?}, view {:?}", mode, anchor, exact, view);
    Ok(ViewRanges { exact, view })
}

/// Anchor of the previous or next period.
///
/// Month navigation keeps the day of month where possible and clamps it to
/// the length of the target month.
pub fn navigate(mode: DisplayMode, anchor: NaiveDate, direction: Direction) -> Result<NaiveDate> {
    let sign = direction.sign();
    let next = match mode {
        DisplayMode::Day => shift_days(anchor, i64::from(sign)),
        DisplayMode::Week | DisplayMode::WorkWeek => shift_days(anchor, 7 * i64::from(sign)),
        DisplayMode::Month => shift_months(anchor, sign),
    };
    next.ok_or_else(|| overflow("navigation target", anchor))
}

/// Move a weekend anchor to the Friday of its week when switching to the
/// work-week grid; every other combination keeps the anchor.
pub fn normalize_anchor(mode: DisplayMode, anchor: NaiveDate) -> NaiveDate {
    if mode != DisplayMode::WorkWeek {
        return anchor;
    }
    let weekday = anchor.weekday().num_days_from_monday();
    if weekday > 4 {
        shift_days(anchor, -i64::from(weekday - 4)).unwrap_or(anchor)
    } else {
        anchor
    }
}
