// Grid geometry model
// Pixel metrics of the time axis and the two coordinate spaces

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Viewport metrics supplied by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMetrics {
    /// Grid divisions per hour (4 = quarter hours)
    pub divisions_per_hour: u32,
    /// Height of one division in pixels
    pub pixels_per_division: f64,
    /// Width of one day column in pixels
    pub pixels_per_column: f64,
    /// Height of one week row in the month grid
    pub pixels_per_week_row: f64,
    /// Hour the time axis is scrolled to initially
    pub start_hour: u32,
    pub columns_visible: u32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            divisions_per_hour: 4,
            pixels_per_division: 40.0,
            pixels_per_column: 120.0,
            pixels_per_week_row: 100.0,
            start_hour: 6,
            columns_visible: 7,
        }
    }
}

impl GridMetrics {
    /// Reject metrics that would divide by zero or yield non-finite positions.
    pub fn validate(&self) -> Result<()> {
        if self.divisions_per_hour < 1 {
            return Err(EngineError::InvalidGridMetrics(
                "divisions_per_hour must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("pixels_per_division", self.pixels_per_division),
            ("pixels_per_column", self.pixels_per_column),
            ("pixels_per_week_row", self.pixels_per_week_row),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidGridMetrics(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.start_hour >= 24 {
            return Err(EngineError::InvalidGridMetrics(format!(
                "start_hour must be below 24, got {}",
                self.start_hour
            )));
        }
        Ok(())
    }

    /// Divisions in a whole day.
    pub fn divisions_per_day(&self) -> i32 {
        24 * self.divisions_per_hour as i32
    }
}

/// A position in logical grid units: x is the day column (the first day
/// column is 1), y the division within the day or the week row in month mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LogicalPoint {
    pub x: i32,
    pub y: i32,
}

impl LogicalPoint {
    pub const ZERO: LogicalPoint = LogicalPoint { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for LogicalPoint {
    type Output = LogicalPoint;

    fn add(self, rhs: LogicalPoint) -> LogicalPoint {
        LogicalPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for LogicalPoint {
    type Output = LogicalPoint;

    fn sub(self, rhs: LogicalPoint) -> LogicalPoint {
        LogicalPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A position in the time axis' local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for PixelPoint {
    type Output = PixelPoint;

    fn sub(self, rhs: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}
