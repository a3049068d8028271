// Property-based tests for range computation, stacking and dragging
// Exercises the invariants with random dates, items and pointer travel

#[path = "../fixtures/mod.rs"]
mod fixtures;

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use proptest::prelude::*;

use calendar_engine::models::display_mode::DisplayMode;
use calendar_engine::models::grid::{GridMetrics, PixelPoint};
use calendar_engine::models::item::{ItemId, ScheduledItem};
use calendar_engine::services::drag::{DragRescheduler, DragView};
use calendar_engine::services::layout::layout;
use calendar_engine::services::range::{compute_exact_range, compute_ranges};
use calendar_engine::utils::date::days_in_month;
use fixtures::dates::{at, mid_june_2016};

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 1900-01-01 .. roughly 2100
    (0u64..73_000).prop_map(|offset| NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Days::new(offset))
}

/// Item as (start minute counted from the day before, length in minutes).
///
/// Starts fall anywhere in a three-day window at minute resolution, so items
/// may be zero-length, end or start between grid lines, or cross midnight
/// into or out of the laid-out day.
fn any_item() -> impl Strategy<Value = (u32, u32)> {
    let length = prop_oneof![
        Just(0u32),
        1u32..240,
        240u32..2 * 1440,
    ];
    (0u32..3 * 1440, length)
}

fn day_items() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec(any_item(), 1..25)
}

fn build_items(specs: &[(u32, u32)]) -> Vec<ScheduledItem> {
    let origin = at(mid_june_2016() - Days::new(1), 0, 0);
    specs
        .iter()
        .enumerate()
        .map(|(index, &(start, length))| {
            let from = origin + Duration::minutes(i64::from(start));
            let to = from + Duration::minutes(i64::from(length));
            ScheduledItem::new(ItemId(index as i64), format!("item {index}"), from, to).unwrap()
        })
        .collect()
}

/// A single-day item on the laid-out day, as (start minute, length in minutes)
fn draggable_item() -> impl Strategy<Value = (u32, u32)> {
    (0u32..1440).prop_flat_map(|start| (Just(start), 0u32..=1440 - start))
}

proptest! {
    /// Property: week ranges start on Monday and span seven days
    #[test]
    fn prop_week_range_is_monday_aligned(anchor in any_date()) {
        let range = compute_exact_range(DisplayMode::Week, anchor).unwrap();
        prop_assert_eq!(range.from.weekday(), Weekday::Mon);
        prop_assert_eq!(range.num_days(), 7);
        prop_assert!(range.contains(anchor));
    }

    /// Property: the work week is the first five days of the week
    #[test]
    fn prop_work_week_has_five_days(anchor in any_date()) {
        let week = compute_exact_range(DisplayMode::Week, anchor).unwrap();
        let work_week = compute_exact_range(DisplayMode::WorkWeek, anchor).unwrap();
        prop_assert_eq!(work_week.from, week.from);
        prop_assert_eq!(work_week.num_days(), 5);
    }

    /// Property: the month range covers exactly the anchor's month
    #[test]
    fn prop_month_range_matches_month_length(anchor in any_date()) {
        let range = compute_exact_range(DisplayMode::Month, anchor).unwrap();
        prop_assert_eq!(range.from.day(), 1);
        prop_assert_eq!(Some(range.num_days()), days_in_month(anchor));
        prop_assert!(range.contains(anchor));
    }

    /// Property: the month grid is six Monday-aligned weeks starting in the previous month
    #[test]
    fn prop_month_view_is_padded(anchor in any_date()) {
        let ranges = compute_ranges(DisplayMode::Month, anchor).unwrap();
        prop_assert_eq!(ranges.view.num_days(), 42);
        prop_assert_eq!(ranges.view.from.weekday(), Weekday::Mon);
        prop_assert!(ranges.view.from < ranges.exact.from);
        prop_assert!(ranges.view.to >= ranges.exact.to);
        prop_assert!(ranges.exact.from - ranges.view.from <= Duration::days(7));
    }

    /// Property: items whose clipped spans overlap never share a column
    #[test]
    fn prop_overlapping_items_get_distinct_columns(specs in day_items()) {
        let day = mid_june_2016();
        let items = build_items(&specs);
        let slots = layout(day, &items);

        let spans: Vec<_> = items
            .iter()
            .filter_map(|item| item.day_span(day).map(|span| (item.id, span)))
            .collect();
        prop_assert_eq!(slots.len(), spans.len());

        for slot in slots.values() {
            prop_assert!(slot.column < slot.column_count);
        }
        for (i, (a, a_span)) in spans.iter().enumerate() {
            for (b, b_span) in &spans[i + 1..] {
                if a_span.overlaps(b_span) {
                    prop_assert_ne!(slots[a].column, slots[b].column);
                }
            }
        }
    }

    /// Property: layout is a pure function of its input
    #[test]
    fn prop_layout_is_idempotent(specs in day_items()) {
        let items = build_items(&specs);
        prop_assert_eq!(layout(mid_june_2016(), &items), layout(mid_june_2016(), &items));
    }

    /// Property: a drag keeps the duration and lands inside the visible week
    #[test]
    fn prop_drag_preserves_duration_and_stays_in_grid(
        (start, length) in draggable_item(),
        divisions_per_hour in 1u32..=12,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
    ) {
        let items = build_items(&[(1440 + start, length)]);
        let item = &items[0];
        let ranges = compute_ranges(DisplayMode::Week, mid_june_2016()).unwrap();
        let view = DragView {
            mode: DisplayMode::Week,
            view_range: ranges.view,
            metrics: GridMetrics {
                divisions_per_hour,
                pixels_per_division: 10.0,
                pixels_per_column: 100.0,
                ..GridMetrics::default()
            },
        };

        let mut drag = DragRescheduler::default();
        drag.begin_gesture(item, PixelPoint::new(0.0, 0.0), view).unwrap();
        drag.update_gesture(PixelPoint::new(dx, dy));
        let result = drag.end_gesture().unwrap();

        prop_assert!(result.committed);
        prop_assert_eq!(result.new_end - result.new_start, item.duration());
        prop_assert!(ranges.view.contains(result.new_start.date()));
        let next_midnight = at(result.new_start.date() + Days::new(1), 0, 0);
        prop_assert!(result.new_end <= next_midnight);
    }
}
