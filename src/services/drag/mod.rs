// Drag rescheduling
//
// Turns a pointer drag over an item into a day/time shift.
// - Idle -> Pending on pointer-down over a draggable item
// - Pending -> Dragging once the pointer travels past the threshold
// - Dragging -> Committing -> Idle on pointer-up
// - Pending/Dragging -> Idle on cancel, without touching the item

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::date_range::DayRange;
use crate::models::display_mode::DisplayMode;
use crate::models::grid::{GridMetrics, LogicalPoint, PixelPoint};
use crate::models::item::{ItemId, ScheduledItem};
use crate::models::settings::{EngineSettings, DEFAULT_DRAG_THRESHOLD_PX};
use crate::services::range::MONTH_VIEW_WEEKS;
use crate::services::selection::SelectionModel;
use crate::services::transform::{logical_position, logical_to_time_of_day, pixel_to_logical, RoundingMode, TimeOfDay};

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// The grid a gesture happens in
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragView {
    pub mode: DisplayMode,
    pub view_range: DayRange,
    pub metrics: GridMetrics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    /// Pointer is down but has not yet travelled past the threshold
    Pending,
    Dragging,
}

/// Why an item cannot be dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotDraggable {
    Locked,
    /// All-day items only move in the month grid
    AllDay,
    /// Items rendered in more than one part
    MultiDay,
}

/// Outcome of a pointer-down
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureStart {
    Started,
    /// Another gesture owns the rescheduler
    AlreadyActive,
    NotDraggable(NotDraggable),
}

/// Inclusive logical bounds for the dragged item's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl DragBounds {
    /// Bounds for an item whose logical position is `anchor`.
    ///
    /// Column 0 is the gutter, so day columns start at 1. Outside the month
    /// grid the vertical limits come from the item's real start and end, so
    /// an item that starts between grid lines still stays within its day.
    pub fn for_item(
        item: &ScheduledItem,
        anchor: LogicalPoint,
        mode: DisplayMode,
        metrics: &GridMetrics,
    ) -> Result<Self> {
        let (min_y, max_y) = if mode.is_month() {
            (1, MONTH_VIEW_WEEKS as i32)
        } else {
            // Whole minutes left before the start and after the end, rounded
            // towards the item
            let start_secs = item.start().time().num_seconds_from_midnight();
            let end_secs = if item.end().date() == item.start().date() {
                item.end().time().num_seconds_from_midnight()
            } else {
                SECONDS_PER_DAY
            };
            let up = divisions_within(start_secs / 60, metrics)?;
            let down = divisions_within(SECONDS_PER_DAY.saturating_sub(end_secs) / 60, metrics)?;
            (anchor.y - up, anchor.y + down)
        };
        Ok(Self {
            min_x: 1,
            max_x: mode.day_columns(),
            min_y,
            max_y,
        })
    }

    /// Shorten `distance` so `anchor + distance` stays inside the bounds.
    pub fn clamp_distance(&self, anchor: LogicalPoint, distance: LogicalPoint) -> LogicalPoint {
        LogicalPoint::new(
            clamp_axis(anchor.x, distance.x, self.min_x, self.max_x),
            clamp_axis(anchor.y, distance.y, self.min_y, self.max_y),
        )
    }
}

/// Largest division count whose time shift fits in `minutes`.
fn divisions_within(minutes: u32, metrics: &GridMetrics) -> Result<i32> {
    let fits = |divisions: i32| -> Result<bool> {
        let shift = logical_to_time_of_day(divisions, metrics)?.as_duration();
        Ok(shift.num_minutes() <= i64::from(minutes))
    };
    let mut divisions = (f64::from(minutes) * f64::from(metrics.divisions_per_hour) / 60.0).floor() as i32;
    while divisions > 0 && !fits(divisions)? {
        divisions -= 1;
    }
    Ok(divisions)
}

fn clamp_axis(anchor: i32, distance: i32, min: i32, max: i32) -> i32 {
    let position = anchor + distance;
    if position < min {
        distance - (position - min)
    } else if position > max {
        distance - (position - max)
    } else {
        distance
    }
}

/// State of an active gesture
#[derive(Clone, Debug)]
pub struct DragContext {
    pub item_id: ItemId,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub duration: Duration,
    pub start_pointer: PixelPoint,
    pub pointer_pos: PixelPoint,
    /// Logical position of the item when the gesture began
    pub anchor: LogicalPoint,
    /// Clamped logical distance travelled so far
    pub distance: LogicalPoint,
    pub moving: bool,
    pub view: DragView,
    pub bounds: DragBounds,
}

impl DragContext {
    pub fn from_item(item: &ScheduledItem, pointer: PixelPoint, view: DragView) -> Result<Self> {
        let anchor = logical_position(item, view.mode, view.view_range, &view.metrics)?;
        let bounds = DragBounds::for_item(item, anchor, view.mode, &view.metrics)?;
        Ok(Self {
            item_id: item.id,
            original_start: item.start(),
            original_end: item.end(),
            duration: item.duration(),
            start_pointer: pointer,
            pointer_pos: pointer,
            anchor,
            distance: LogicalPoint::ZERO,
            moving: false,
            view,
            bounds,
        })
    }

    /// Current (clamped) logical position of the dragged item
    pub fn position(&self) -> LogicalPoint {
        self.anchor + self.distance
    }

    pub fn phase(&self) -> DragPhase {
        if self.moving {
            DragPhase::Dragging
        } else {
            DragPhase::Pending
        }
    }
}

/// Final outcome of a gesture.
///
/// A cancelled gesture is `committed: false`; a click without travel is
/// `committed: true, changed: false`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleResult {
    pub item_id: ItemId,
    pub committed: bool,
    pub changed: bool,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
    pub days_shift: i64,
    /// Time-of-day shift, outside the month grid only
    pub time_shift: Option<TimeOfDay>,
}

impl RescheduleResult {
    fn unchanged(context: &DragContext, committed: bool) -> Self {
        Self {
            item_id: context.item_id,
            committed,
            changed: false,
            new_start: context.original_start,
            new_end: context.original_end,
            days_shift: 0,
            time_shift: None,
        }
    }
}

/// Owns at most one drag session at a time.
#[derive(Debug)]
pub struct DragRescheduler {
    threshold_px: f64,
    session: Option<DragContext>,
}

impl Default for DragRescheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl DragRescheduler {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            session: None,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.drag_threshold_px)
    }

    pub fn active(&self) -> Option<&DragContext> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map_or(DragPhase::Idle, DragContext::phase)
    }

    /// Pointer-down over `item`. Never mutates the item.
    pub fn begin_gesture(
        &mut self,
        item: &ScheduledItem,
        pointer: PixelPoint,
        view: DragView,
    ) -> Result<GestureStart> {
        if let Some(active) = &self.session {
            log::debug!("ignoring drag of {} while {} is being dragged", item.id, active.item_id);
            return Ok(GestureStart::AlreadyActive);
        }

        let rejection = if !item.draggable {
            Some(NotDraggable::Locked)
        } else if item.all_day && !view.mode.is_month() {
            Some(NotDraggable::AllDay)
        } else if !item.is_single_segment() {
            Some(NotDraggable::MultiDay)
        } else {
            None
        };
        if let Some(reason) = rejection {
            log::debug!("{} is not draggable: {:?}", item.id, reason);
            return Ok(GestureStart::NotDraggable(reason));
        }

        view.metrics.validate()?;
        let context = DragContext::from_item(item, pointer, view)?;
        log::debug!("drag of {} pending at {:?}", item.id, context.anchor);
        self.session = Some(context);
        Ok(GestureStart::Started)
    }

    /// Pointer-move; returns the clamped preview position.
    ///
    /// Each call works from the absolute pointer position, so skipped
    /// frames lose nothing.
    pub fn update_gesture(&mut self, pointer: PixelPoint) -> Option<LogicalPoint> {
        let threshold = self.threshold_px;
        let session = self.session.as_mut()?;
        session.pointer_pos = pointer;

        let travel = pointer - session.start_pointer;
        if !session.moving {
            if travel.x.abs() < threshold && travel.y.abs() < threshold {
                return Some(session.position());
            }
            session.moving = true;
            log::debug!("drag of {} started moving", session.item_id);
        }

        let view = session.view;
        match pixel_to_logical(travel, &view.metrics, view.mode, LogicalPoint::ZERO, RoundingMode::Nearest) {
            Ok(raw) => session.distance = session.bounds.clamp_distance(session.anchor, raw),
            Err(err) => log::warn!("keeping last drag position: {}", err),
        }
        Some(session.position())
    }

    /// Pointer-up; commits the accumulated distance.
    pub fn end_gesture(&mut self) -> Option<RescheduleResult> {
        let session = self.session.take()?;
        let distance = if session.moving { session.distance } else { LogicalPoint::ZERO };
        if distance.is_zero() {
            log::debug!("drag of {} ended without moving", session.item_id);
            return Some(RescheduleResult::unchanged(&session, true));
        }

        match commit(&session, distance) {
            Ok(result) => {
                log::debug!(
                    "rescheduled {} to {} - {}",
                    result.item_id,
                    result.new_start,
                    result.new_end
                );
                Some(result)
            }
            Err(err) => {
                log::warn!("drag of {} could not be applied: {}", session.item_id, err);
                Some(RescheduleResult::unchanged(&session, true))
            }
        }
    }

    /// Discard the active gesture; the item is left untouched.
    pub fn cancel_gesture(&mut self) -> Option<RescheduleResult> {
        let session = self.session.take()?;
        log::debug!("drag of {} cancelled", session.item_id);
        Some(RescheduleResult::unchanged(&session, false))
    }
}

fn commit(session: &DragContext, distance: LogicalPoint) -> Result<RescheduleResult> {
    let view = &session.view;
    let (days_shift, time_shift) = if view.mode.is_month() {
        // In the month grid a row is a week
        (i64::from(distance.x) + 7 * i64::from(distance.y), None)
    } else {
        (
            i64::from(distance.x),
            Some(logical_to_time_of_day(distance.y, &view.metrics)?),
        )
    };

    let shift = Duration::days(days_shift)
        + time_shift.map_or_else(Duration::zero, |time| time.as_duration());
    let shifted = session
        .original_start
        .checked_add_signed(shift)
        .zip(session.original_end.checked_add_signed(shift));
    let Some((new_start, new_end)) = shifted else {
        return Err(EngineError::RangeComputation(format!(
            "shifting {} by {} leaves the supported calendar",
            session.item_id, shift
        )));
    };

    Ok(RescheduleResult {
        item_id: session.item_id,
        committed: true,
        changed: shift != Duration::zero(),
        new_start,
        new_end,
        days_shift,
        time_shift,
    })
}

/// Write a committed result back into its item and select it.
///
/// Returns whether the item's times changed.
pub fn apply_reschedule(
    result: &RescheduleResult,
    item: &mut ScheduledItem,
    selection: &mut SelectionModel,
) -> Result<bool> {
    if !result.committed || result.item_id != item.id {
        return Ok(false);
    }
    if result.changed {
        item.reschedule(result.new_start, result.new_end)?;
    }
    selection.select(result.new_start.date(), Some(item.id));
    Ok(result.changed)
}
