use chrono::{Duration, NaiveDateTime, Timelike};

use crate::models::date_range::TimeRange;

/// Granularity of a drag-selected time range, in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Tracks a press-and-drag over empty grid slots.
///
/// Both ends snap down to the slot they fall in; the range ends one slot
/// after the later of the two, whichever direction the pointer moved.
#[derive(Debug, Clone, Default)]
pub struct RangeSelector {
    anchor: Option<NaiveDateTime>,
    current: Option<NaiveDateTime>,
}

fn snap(at: NaiveDateTime) -> NaiveDateTime {
    let minute = at.minute() - at.minute() % SLOT_MINUTES;
    at.date()
        .and_hms_opt(at.hour(), minute, 0)
        .unwrap_or(at)
}

impl RangeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn start(&mut self, at: NaiveDateTime) {
        let slot = snap(at);
        self.anchor = Some(slot);
        self.current = Some(slot);
    }

    /// Move the free end; ignored when no selection is in progress.
    pub fn extend(&mut self, at: NaiveDateTime) -> Option<TimeRange> {
        self.anchor?;
        self.current = Some(snap(at));
        self.range()
    }

    /// The range covered so far.
    pub fn range(&self) -> Option<TimeRange> {
        let (anchor, current) = (self.anchor?, self.current?);
        let (from, last) = if current < anchor { (current, anchor) } else { (anchor, current) };
        let to = last.checked_add_signed(Duration::minutes(i64::from(SLOT_MINUTES)))?;
        Some(TimeRange::new(from, to))
    }

    pub fn finish(&mut self) -> Option<TimeRange> {
        let range = self.range();
        self.anchor = None;
        self.current = None;
        range
    }
}
