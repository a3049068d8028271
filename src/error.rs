//! Error types for the calendar engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the pure computations of the engine.
///
/// Drag outcomes (no column, zero distance, rejected gesture) are not errors;
/// they are reported through [`crate::services::drag::RescheduleResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A display mode value that is not day, week, work week or month
    #[error("Invalid display mode: {0}")]
    InvalidDisplayMode(String),

    /// Calendar arithmetic left the supported range or a bounded search failed
    #[error("Range computation failed: {0}")]
    RangeComputation(String),

    /// Grid metrics that would divide by zero or produce non-finite positions
    #[error("Invalid grid metrics: {0}")]
    InvalidGridMetrics(String),

    /// A scheduled item whose end lies before its start
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}
