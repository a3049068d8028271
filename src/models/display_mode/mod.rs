// Display mode model
// Which period the calendar grid shows

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Calendar display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Day,
    WorkWeek,
    Week,
    #[default]
    Month,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Day,
        DisplayMode::WorkWeek,
        DisplayMode::Week,
        DisplayMode::Month,
    ];

    pub fn is_month(self) -> bool {
        matches!(self, DisplayMode::Month)
    }

    /// Number of day columns rendered side by side (month rows have seven).
    pub fn day_columns(self) -> i32 {
        match self {
            DisplayMode::Day => 1,
            DisplayMode::WorkWeek => 5,
            DisplayMode::Week | DisplayMode::Month => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Day => "day",
            DisplayMode::WorkWeek => "work_week",
            DisplayMode::Week => "week",
            DisplayMode::Month => "month",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(DisplayMode::Day),
            "work_week" | "workweek" | "work-week" => Ok(DisplayMode::WorkWeek),
            "week" => Ok(DisplayMode::Week),
            "month" => Ok(DisplayMode::Month),
            _ => Err(EngineError::InvalidDisplayMode(s.to_string())),
        }
    }
}
