//! Pixel <-> logical grid conversions.
//!
//! All functions are pure; the same code serves the live drag preview and
//! the final commit.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::date_range::DayRange;
use crate::models::display_mode::DisplayMode;
use crate::models::grid::{GridMetrics, LogicalPoint, PixelPoint};
use crate::models::item::ScheduledItem;
use crate::utils::date::{compare_days, minutes_since_midnight, monday_on_or_before};

/// How fractional grid positions snap to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Half away from zero
    #[default]
    Nearest,
    Floor,
    Ceiling,
}

impl RoundingMode {
    pub fn apply(self, value: f64) -> i32 {
        let rounded = match self {
            RoundingMode::Nearest => value.round(),
            RoundingMode::Floor => value.floor(),
            RoundingMode::Ceiling => value.ceil(),
        };
        rounded as i32
    }
}

/// An hour/minute pair. Negative division counts produce a negative hour
/// with a positive minute part, e.g. -1 division of 30 min is `-1h +30m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: i64,
    pub minute: i64,
}

impl TimeOfDay {
    pub fn as_duration(&self) -> Duration {
        Duration::hours(self.hour) + Duration::minutes(self.minute)
    }

    /// Wall-clock time, when the pair lies inside one day.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let hour = u32::try_from(self.hour).ok()?;
        let minute = u32::try_from(self.minute).ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    }
}

fn vertical_unit(metrics: &GridMetrics, mode: DisplayMode) -> f64 {
    if mode.is_month() {
        metrics.pixels_per_week_row
    } else {
        metrics.pixels_per_division
    }
}

/// Snap a pixel offset to logical grid units, relative to `origin`.
///
/// The day grid has a single column, so horizontal travel is ignored there.
pub fn pixel_to_logical(
    pixel: PixelPoint,
    metrics: &GridMetrics,
    mode: DisplayMode,
    origin: LogicalPoint,
    rounding: RoundingMode,
) -> Result<LogicalPoint> {
    metrics.validate()?;
    let x = if mode == DisplayMode::Day {
        0
    } else {
        rounding.apply(pixel.x / metrics.pixels_per_column)
    };
    let y = rounding.apply(pixel.y / vertical_unit(metrics, mode));
    Ok(origin + LogicalPoint::new(x, y))
}

/// Pixel offset of a logical distance, the inverse of [`pixel_to_logical`].
pub fn logical_to_pixel(
    point: LogicalPoint,
    metrics: &GridMetrics,
    mode: DisplayMode,
) -> Result<PixelPoint> {
    metrics.validate()?;
    Ok(PixelPoint::new(
        f64::from(point.x) * metrics.pixels_per_column,
        f64::from(point.y) * vertical_unit(metrics, mode),
    ))
}

/// Convert a division count into hours and minutes, rounded to the
/// nearest whole minute.
pub fn logical_to_time_of_day(division: i32, metrics: &GridMetrics) -> Result<TimeOfDay> {
    metrics.validate()?;
    let total = (f64::from(division) * 60.0 / f64::from(metrics.divisions_per_hour)).round() as i64;
    Ok(TimeOfDay {
        hour: total.div_euclid(60),
        minute: total.rem_euclid(60),
    })
}

/// Division index of a wall-clock time.
pub fn time_to_division(time: NaiveTime, metrics: &GridMetrics, rounding: RoundingMode) -> Result<i32> {
    metrics.validate()?;
    let minutes = f64::from(minutes_since_midnight(time));
    Ok(rounding.apply(minutes * f64::from(metrics.divisions_per_hour) / 60.0))
}

/// Position of a time of day as a percentage of the day's height, rounded
/// to two decimals.
pub fn vertical_percent(minutes: u32) -> f64 {
    let percent = 100.0 / (24.0 * 60.0) * f64::from(minutes);
    (percent * 100.0).round() / 100.0
}

/// Scroll offset in pixels that brings the configured start hour to the top.
pub fn start_hour_offset(metrics: &GridMetrics) -> Result<f64> {
    metrics.validate()?;
    Ok(f64::from(metrics.start_hour * metrics.divisions_per_hour) * metrics.pixels_per_division)
}

/// Day column of `date` in the rendered grid; the first day column is 1.
pub fn day_column(date: NaiveDate, mode: DisplayMode, view_range: DayRange) -> i32 {
    match mode {
        DisplayMode::Day => 1,
        DisplayMode::Week | DisplayMode::WorkWeek => compare_days(date, view_range.from) as i32 + 1,
        DisplayMode::Month => {
            let week_start = monday_on_or_before(date).unwrap_or(date);
            compare_days(date, week_start) as i32 + 1
        }
    }
}

/// Logical position of an item's first part.
///
/// x is its day column; y is the division of its start time, or the week
/// row (from 1) of its first day in month mode.
pub fn logical_position(
    item: &ScheduledItem,
    mode: DisplayMode,
    view_range: DayRange,
    metrics: &GridMetrics,
) -> Result<LogicalPoint> {
    let first_day = item.covered_days().from;
    let x = day_column(first_day, mode, view_range);
    let y = if mode.is_month() {
        (compare_days(first_day, view_range.from).div_euclid(7) + 1) as i32
    } else {
        time_to_division(item.start().time(), metrics, RoundingMode::Floor)?
    };
    Ok(LogicalPoint::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::item::ItemId;

    fn metrics(divisions_per_hour: u32) -> GridMetrics {
        GridMetrics {
            divisions_per_hour,
            pixels_per_division: 20.0,
            pixels_per_column: 100.0,
            pixels_per_week_row: 80.0,
            ..GridMetrics::default()
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 6, d).unwrap()
    }

    #[test]
    fn test_rounding_modes() {
        assert_eq!(RoundingMode::Nearest.apply(2.5), 3);
        assert_eq!(RoundingMode::Nearest.apply(-2.5), -3);
        assert_eq!(RoundingMode::Floor.apply(2.9), 2);
        assert_eq!(RoundingMode::Ceiling.apply(2.1), 3);
    }

    #[test]
    fn test_pixel_to_logical_snaps_to_grid() {
        let m = metrics(4);
        let point = pixel_to_logical(
            PixelPoint::new(210.0, 55.0),
            &m,
            DisplayMode::Week,
            LogicalPoint::ZERO,
            RoundingMode::Nearest,
        )
        .unwrap();
        assert_eq!(point, LogicalPoint::new(2, 3));

        let floor = pixel_to_logical(
            PixelPoint::new(210.0, 55.0),
            &m,
            DisplayMode::Week,
            LogicalPoint::new(1, 0),
            RoundingMode::Floor,
        )
        .unwrap();
        assert_eq!(floor, LogicalPoint::new(3, 2));
    }

    #[test]
    fn test_day_mode_ignores_horizontal_travel() {
        let point = pixel_to_logical(
            PixelPoint::new(500.0, 40.0),
            &metrics(4),
            DisplayMode::Day,
            LogicalPoint::ZERO,
            RoundingMode::Nearest,
        )
        .unwrap();
        assert_eq!(point, LogicalPoint::new(0, 2));
    }

    #[test]
    fn test_month_mode_uses_week_rows() {
        let point = pixel_to_logical(
            PixelPoint::new(0.0, 170.0),
            &metrics(4),
            DisplayMode::Month,
            LogicalPoint::ZERO,
            RoundingMode::Nearest,
        )
        .unwrap();
        assert_eq!(point.y, 2);
    }

    #[test]
    fn test_invalid_metrics_rejected_before_division() {
        let bad = GridMetrics { divisions_per_hour: 0, ..GridMetrics::default() };
        assert!(matches!(
            logical_to_time_of_day(3, &bad),
            Err(EngineError::InvalidGridMetrics(_))
        ));
        assert!(pixel_to_logical(
            PixelPoint::default(),
            &bad,
            DisplayMode::Week,
            LogicalPoint::ZERO,
            RoundingMode::Nearest
        )
        .is_err());
    }

    #[test]
    fn test_logical_to_time_of_day() {
        assert_eq!(
            logical_to_time_of_day(6, &metrics(4)).unwrap(),
            TimeOfDay { hour: 1, minute: 30 }
        );
        assert_eq!(
            logical_to_time_of_day(-1, &metrics(2)).unwrap(),
            TimeOfDay { hour: -1, minute: 30 }
        );
        assert_eq!(
            logical_to_time_of_day(-1, &metrics(2)).unwrap().as_duration(),
            Duration::minutes(-30)
        );
    }

    #[test]
    fn test_non_integral_divisions_round_to_minute() {
        // 7 divisions per hour: 60/7 = 8.57 minutes each
        let time = logical_to_time_of_day(3, &metrics(7)).unwrap();
        assert_eq!(time, TimeOfDay { hour: 0, minute: 26 });
        assert_eq!(logical_to_time_of_day(7, &metrics(7)).unwrap(), TimeOfDay { hour: 1, minute: 0 });
    }

    #[test]
    fn test_time_round_trip_on_half_hour_grid() {
        let m = metrics(2);
        for division in 0..48 {
            let pixel = logical_to_pixel(LogicalPoint::new(0, division), &m, DisplayMode::Week).unwrap();
            let logical = pixel_to_logical(pixel, &m, DisplayMode::Week, LogicalPoint::ZERO, RoundingMode::Nearest).unwrap();
            let time = logical_to_time_of_day(logical.y, &m).unwrap().to_naive_time().unwrap();
            assert_eq!(time_to_division(time, &m, RoundingMode::Nearest).unwrap(), division);
        }
    }

    #[test]
    fn test_vertical_percent_and_start_offset() {
        assert_eq!(vertical_percent(12 * 60), 50.0);
        assert_eq!(vertical_percent(10), 0.69);
        assert_eq!(start_hour_offset(&GridMetrics::default()).unwrap(), 6.0 * 4.0 * 40.0);
    }

    #[test]
    fn test_logical_position_in_week_and_month() {
        let m = metrics(4);
        let start = date(22).and_hms_opt(9, 30, 0).unwrap();
        let item = ScheduledItem::new(ItemId(1), "x", start, start + Duration::hours(1)).unwrap();

        let week = DayRange::new(date(20), date(27));
        assert_eq!(
            logical_position(&item, DisplayMode::Week, week, &m).unwrap(),
            LogicalPoint::new(3, 38)
        );

        let month = DayRange::new(date(30) - Duration::days(31), date(30) + Duration::days(11));
        // Jun 22 is a Wednesday in the fourth row of the grid starting May 30
        assert_eq!(
            logical_position(&item, DisplayMode::Month, month, &m).unwrap(),
            LogicalPoint::new(3, 4)
        );
    }
}
