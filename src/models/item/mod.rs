// Scheduled item module
// Time-bound entries laid out and rescheduled by the engine

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::date_range::DayRange;
use crate::utils::date::{minutes_since_midnight, shift_days};

/// Minutes in a full day; the exclusive end of an interior day span.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Opaque, stable identifier of a scheduled item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The part of an item that falls on one day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub from: u32,
    pub to: u32,
}

impl DaySpan {
    /// True when this span ends at or before `instant`.
    pub fn ends_by(&self, instant: u32) -> bool {
        self.to <= instant
    }

    /// Strict interval overlap. Zero-width spans only overlap spans that
    /// strictly contain them.
    pub fn overlaps(&self, other: &DaySpan) -> bool {
        if self.from == self.to {
            return other.from < self.from && self.from < other.to;
        }
        if other.from == other.to {
            return self.from < other.from && other.from < self.to;
        }
        self.from < other.to && other.from < self.to
    }
}

/// A time-bound entry shown in the calendar grid.
///
/// `start`/`end` are private so the derived `covered_days` can never go
/// stale; use [`ScheduledItem::reschedule`] to move an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ItemRecord", try_from = "ItemRecord")]
pub struct ScheduledItem {
    pub id: ItemId,
    pub title: String,
    pub all_day: bool,
    pub draggable: bool,
    start: NaiveDateTime,
    end: NaiveDateTime,
    covered_days: DayRange,
}

impl ScheduledItem {
    /// Create a new item
    ///
    /// # Examples
    /// ```
    /// use calendar_engine::models::item::{ItemId, ScheduledItem};
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2016, 6, 22).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let item = ScheduledItem::new(ItemId(1), "Standup", start, end).unwrap();
    /// assert_eq!(item.covered_days().from, start.date());
    /// ```
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        let covered_days = covered_days_for(start, end)?;
        Ok(Self {
            id,
            title: title.into(),
            all_day: false,
            draggable: true,
            start,
            end,
            covered_days,
        })
    }

    /// Create a builder for constructing items with optional fields
    pub fn builder() -> ItemBuilder {
        ItemBuilder::new()
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Inclusive range of calendar days the item visually spans.
    pub fn covered_days(&self) -> DayRange {
        self.covered_days
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }

    pub fn covers_day(&self, day: NaiveDate) -> bool {
        self.covered_days.contains_inclusive(day)
    }

    /// Items rendered as one part only (a single covered day).
    pub fn is_single_segment(&self) -> bool {
        self.covered_days.from == self.covered_days.to
    }

    /// The span of this item on `day`, clipped to the day.
    pub fn day_span(&self, day: NaiveDate) -> Option<DaySpan> {
        if !self.covers_day(day) {
            return None;
        }
        let from = if self.start.date() == day {
            minutes_since_midnight(self.start.time())
        } else {
            0
        };
        let to = if self.end.date() == day {
            minutes_since_midnight(self.end.time())
        } else {
            MINUTES_PER_DAY
        };
        Some(DaySpan { from, to: to.max(from) })
    }

    /// Move the item to new times, re-deriving the covered days.
    pub fn reschedule(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
        self.covered_days = covered_days_for(start, end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }
}

fn covered_days_for(start: NaiveDateTime, end: NaiveDateTime) -> Result<DayRange> {
    if end < start {
        return Err(EngineError::InvalidItem(format!(
            "end {end} lies before start {start}"
        )));
    }

    let from = start.date();
    let mut to = end.date();
    // An end at exactly midnight belongs to the previous day
    if to > from && end.time().num_seconds_from_midnight() == 0 {
        to = shift_days(to, -1).unwrap_or(from);
    }
    Ok(DayRange::new(from, to))
}

/// Serialized form of an item; the covered days are derived on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemRecord {
    id: ItemId,
    #[serde(default)]
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(default)]
    all_day: bool,
    #[serde(default = "default_draggable")]
    draggable: bool,
}

fn default_draggable() -> bool {
    true
}

impl From<ScheduledItem> for ItemRecord {
    fn from(item: ScheduledItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            start: item.start,
            end: item.end,
            all_day: item.all_day,
            draggable: item.draggable,
        }
    }
}

impl TryFrom<ItemRecord> for ScheduledItem {
    type Error = EngineError;

    fn try_from(record: ItemRecord) -> Result<Self> {
        let mut item = ScheduledItem::new(record.id, record.title, record.start, record.end)?;
        item.all_day = record.all_day;
        item.draggable = record.draggable;
        Ok(item)
    }
}

/// Builder for creating items with optional fields
pub struct ItemBuilder {
    id: Option<ItemId>,
    title: String,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
    draggable: bool,
}

impl ItemBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: String::new(),
            start: None,
            end: None,
            all_day: false,
            draggable: true,
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(ItemId(id));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set as all-day item
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Build the item
    pub fn build(self) -> Result<ScheduledItem> {
        let id = self
            .id
            .ok_or_else(|| EngineError::InvalidItem("item id is required".to_string()))?;
        let start = self
            .start
            .ok_or_else(|| EngineError::InvalidItem("item start time is required".to_string()))?;
        let end = self
            .end
            .ok_or_else(|| EngineError::InvalidItem("item end time is required".to_string()))?;

        let mut item = ScheduledItem::new(id, self.title, start, end)?;
        item.all_day = self.all_day;
        item.draggable = self.draggable;
        Ok(item)
    }
}

impl Default for ItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
