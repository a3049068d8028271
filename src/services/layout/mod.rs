//! Overlap stacking for the time grid.
//!
//! Items sharing a day are assigned to columns greedily: sorted by start,
//! each item takes the first column whose occupant has already ended, or
//! opens a new one. Every occupant of the current column group reports the
//! group's width as its `column_count`.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::date_range::DayRange;
use crate::models::display_mode::DisplayMode;
use crate::models::item::{DaySpan, ItemId, ScheduledItem};
use crate::services::range::visible_days;

/// Column placement of one item on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSlot {
    pub column: usize,
    pub column_count: usize,
}

impl StackSlot {
    /// Horizontal placement as `(left, width)` fractions of the day column.
    pub fn fractions(&self) -> (f64, f64) {
        let count = self.column_count.max(1) as f64;
        (self.column as f64 / count, 1.0 / count)
    }
}

/// Slot assignments of one day, keyed by item.
pub type DayLayout = HashMap<ItemId, StackSlot>;

struct Placed<'a> {
    item: &'a ScheduledItem,
    span: DaySpan,
}

/// Items that cover `day`, in input order (the list panel of a day).
pub fn items_on_day(day: NaiveDate, items: &[ScheduledItem]) -> Vec<&ScheduledItem> {
    items.iter().filter(|item| item.covers_day(day)).collect()
}

/// Assign columns to the timed items of `day`.
pub fn layout(day: NaiveDate, items: &[ScheduledItem]) -> DayLayout {
    let mut participants: Vec<Placed<'_>> = items
        .iter()
        .filter(|item| !item.all_day)
        .filter_map(|item| item.day_span(day).map(|span| Placed { item, span }))
        .collect();

    participants.sort_by(|a, b| {
        a.span
            .from
            .cmp(&b.span.from)
            .then(a.span.to.cmp(&b.span.to))
            .then_with(|| a.item.title.cmp(&b.item.title))
            .then(a.item.id.cmp(&b.item.id))
    });

    let mut slots = DayLayout::with_capacity(participants.len());
    // Index into `participants` of each column's current occupant
    let mut columns: Vec<usize> = Vec::new();

    for (index, placed) in participants.iter().enumerate() {
        let start = placed.span.from;

        if !columns.is_empty()
            && columns
                .iter()
                .all(|&occupant| participants[occupant].span.ends_by(start))
        {
            columns.clear();
        }

        let column = match columns
            .iter()
            .position(|&occupant| participants[occupant].span.ends_by(start))
        {
            Some(free) => {
                columns[free] = index;
                free
            }
            None => {
                columns.push(index);
                columns.len() - 1
            }
        };
        log::trace!("{} on {} -> column {}", placed.item.id, day, column);

        slots.insert(placed.item.id, StackSlot { column, column_count: 0 });
        let width = columns.len();
        for &occupant in &columns {
            if let Some(slot) = slots.get_mut(&participants[occupant].item.id) {
                slot.column_count = width;
            }
        }
    }

    slots
}

/// Lay out every day of `view_range`.
///
/// The month grid lists items per day instead of stacking them by hour, so
/// in month mode each day maps to an empty layout.
pub fn layout_view(
    mode: DisplayMode,
    view_range: DayRange,
    items: &[ScheduledItem],
) -> BTreeMap<NaiveDate, DayLayout> {
    let layouts: BTreeMap<_, _> = visible_days(view_range)
        .map(|day| {
            let slots = if mode.is_month() { DayLayout::new() } else { layout(day, items) };
            (day, slots)
        })
        .collect();
    log::debug!(
        "laid out {} items over {} days ({})",
        items.len(),
        layouts.len(),
        mode
    );
    layouts
}
