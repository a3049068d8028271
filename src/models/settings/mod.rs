// Settings module
// Host-tunable engine settings, stored as TOML

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::display_mode::DisplayMode;
use crate::models::grid::GridMetrics;

/// Pointer travel (pixels, per axis) before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 7.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub default_mode: DisplayMode,
    pub drag_threshold_px: f64,
    pub grid: GridMetrics,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_mode: DisplayMode::default(),
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            grid: GridMetrics::default(),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            return Err(EngineError::InvalidGridMetrics(format!(
                "drag_threshold_px must be a non-negative number, got {}",
                self.drag_threshold_px
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
