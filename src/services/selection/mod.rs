//! Selected date, item and time range, with change notification.
//!
//! Dates are compared at day resolution. Every mutating call emits at most
//! one notification, after all fields have been updated.

mod range_selector;

pub use range_selector::{RangeSelector, SLOT_MINUTES};

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::date_range::TimeRange;
use crate::models::item::ItemId;

/// Snapshot handed to observers after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    pub date: NaiveDate,
    pub item: Option<ItemId>,
    pub range: Option<TimeRange>,
    pub date_changed: bool,
    pub item_changed: bool,
    pub range_changed: bool,
}

#[cfg_attr(test, mockall::automock)]
pub trait SelectionObserver {
    fn selection_changed(&mut self, change: &SelectionChange);
}

struct FnObserver<F>(F);

impl<F: FnMut(&SelectionChange)> SelectionObserver for FnObserver<F> {
    fn selection_changed(&mut self, change: &SelectionChange) {
        (self.0)(change)
    }
}

/// Handle returned by listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct SelectionModel {
    selected_date: NaiveDate,
    selected_item: Option<ItemId>,
    selected_range: Option<TimeRange>,
    listeners: Vec<(ListenerId, Box<dyn SelectionObserver>)>,
    next_listener: u64,
}

impl fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionModel")
            .field("selected_date", &self.selected_date)
            .field("selected_item", &self.selected_item)
            .field("selected_range", &self.selected_range)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionModel {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            selected_date: date,
            selected_item: None,
            selected_range: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.selected_item
    }

    pub fn selected_range(&self) -> Option<TimeRange> {
        self.selected_range
    }

    pub fn add_observer(&mut self, observer: Box<dyn SelectionObserver>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, observer));
        id
    }

    /// Register a closure called after every change.
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        self.add_observer(Box::new(FnObserver(listener)))
    }

    /// Returns false when `id` was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        self.update(Some(date), None, None)
    }

    pub fn select_item(&mut self, item: Option<ItemId>) -> bool {
        self.update(None, Some(item), None)
    }

    /// Update date and item together with a single notification.
    pub fn select(&mut self, date: NaiveDate, item: Option<ItemId>) -> bool {
        self.update(Some(date), Some(item), None)
    }

    pub fn set_selected_range(&mut self, range: TimeRange) -> bool {
        self.update(None, None, Some(Some(range)))
    }

    pub fn clear_selected_range(&mut self) -> bool {
        self.update(None, None, Some(None))
    }

    /// A new grid invalidates any time range picked in the old one.
    pub fn display_mode_changed(&mut self) -> bool {
        self.clear_selected_range()
    }

    fn update(
        &mut self,
        date: Option<NaiveDate>,
        item: Option<Option<ItemId>>,
        range: Option<Option<TimeRange>>,
    ) -> bool {
        let date_changed = date.is_some_and(|date| date != self.selected_date);
        let item_changed = item.is_some_and(|item| item != self.selected_item);
        let range_changed = range.is_some_and(|range| range != self.selected_range);
        if !(date_changed || item_changed || range_changed) {
            return false;
        }

        if let Some(date) = date {
            self.selected_date = date;
        }
        if let Some(item) = item {
            self.selected_item = item;
        }
        if let Some(range) = range {
            self.selected_range = range;
        }

        let change = SelectionChange {
            date: self.selected_date,
            item: self.selected_item,
            range: self.selected_range,
            date_changed,
            item_changed,
            range_changed,
        };
        log::debug!("selection changed: {:?}", change);
        for (_, listener) in &mut self.listeners {
            listener.selection_changed(&change);
        }
        true
    }
}
