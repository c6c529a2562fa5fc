//! Reducer-style application state.
//!
//! [`AppState`] is an immutable snapshot; [`reduce`] folds an [`Action`]
//! into it and returns the next snapshot. The controller wraps the
//! repository and dispatches actions only after persistence succeeds.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::category::Category;
use crate::domain::entry::{Entry, Quadrant};
use crate::domain::settings::Settings;
use crate::domain::types::{CategoryId, EntryId};

pub mod controller;

pub use controller::AppController;

/// Filters applied when charting entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartFilters {
    /// Categories excluded from charts.
    pub hidden_categories: HashSet<CategoryId>,
    /// When set, only these quadrants are included.
    pub quadrants: Option<HashSet<Quadrant>>,
    /// When set, only entries within the inclusive date range are included.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl ChartFilters {
    /// Whether an entry passes every active filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        if self.hidden_categories.contains(&entry.category_id) {
            return false;
        }
        if let Some(quadrants) = &self.quadrants {
            if !quadrants.contains(&entry.quadrant()) {
                return false;
            }
        }
        if let Some((from, to)) = self.date_range {
            if entry.date < from || entry.date > to {
                return false;
            }
        }
        true
    }
}

/// Snapshot of everything the UI renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub categories: Vec<Category>,
    pub time_entries: Vec<Entry>,
    pub planned_entries: Vec<Entry>,
    pub settings: Settings,
    pub is_loading: bool,
    pub error: Option<String>,
    /// First day of the week currently displayed.
    pub current_week: NaiveDate,
    pub filters: ChartFilters,
}

impl AppState {
    /// Empty loading state anchored at a week start.
    pub fn new(current_week: NaiveDate) -> Self {
        Self {
            categories: Vec::new(),
            time_entries: Vec::new(),
            planned_entries: Vec::new(),
            settings: Settings::default(),
            is_loading: true,
            error: None,
            current_week,
            filters: ChartFilters::default(),
        }
    }

    /// Tracked entries passing the active chart filters.
    pub fn filtered_time_entries(&self) -> Vec<&Entry> {
        self.time_entries
            .iter()
            .filter(|e| self.filters.matches(e))
            .collect()
    }
}

/// Every state transition the controller can dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    SetCategories(Vec<Category>),
    SetTimeEntries(Vec<Entry>),
    SetPlannedEntries(Vec<Entry>),
    AddCategory(Category),
    UpdateCategory(Category),
    DeleteCategory(CategoryId),
    UpsertTimeEntry(Entry),
    DeleteTimeEntry(EntryId),
    UpsertPlannedEntry(Entry),
    DeletePlannedEntry(EntryId),
    SetCurrentWeek(NaiveDate),
    SetSettings(Settings),
    SetFilters(ChartFilters),
}

fn upsert_by_slot(mut entries: Vec<Entry>, entry: Entry) -> Vec<Entry> {
    entries.retain(|e| e.slot() != entry.slot());
    entries.push(entry);
    entries
}

/// Pure transition function; every action produces the next state.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::SetLoading(is_loading) => AppState {
            is_loading,
            ..state
        },
        Action::SetError(error) => AppState { error, ..state },
        Action::SetCategories(categories) => AppState {
            categories,
            ..state
        },
        Action::SetTimeEntries(time_entries) => AppState {
            time_entries,
            ..state
        },
        Action::SetPlannedEntries(planned_entries) => AppState {
            planned_entries,
            ..state
        },
        Action::AddCategory(category) => {
            let mut categories = state.categories;
            categories.push(category);
            AppState {
                categories,
                ..state
            }
        }
        Action::UpdateCategory(category) => {
            let categories = state
                .categories
                .into_iter()
                .map(|c| if c.id == category.id { category.clone() } else { c })
                .collect();
            AppState {
                categories,
                ..state
            }
        }
        Action::DeleteCategory(id) => {
            let mut categories = state.categories;
            categories.retain(|c| c.id != id);
            AppState {
                categories,
                ..state
            }
        }
        Action::UpsertTimeEntry(entry) => AppState {
            time_entries: upsert_by_slot(state.time_entries, entry),
            ..state
        },
        Action::DeleteTimeEntry(id) => {
            let mut time_entries = state.time_entries;
            time_entries.retain(|e| e.id != id);
            AppState {
                time_entries,
                ..state
            }
        }
        Action::UpsertPlannedEntry(entry) => AppState {
            planned_entries: upsert_by_slot(state.planned_entries, entry),
            ..state
        },
        Action::DeletePlannedEntry(id) => {
            let mut planned_entries = state.planned_entries;
            planned_entries.retain(|e| e.id != id);
            AppState {
                planned_entries,
                ..state
            }
        }
        Action::SetCurrentWeek(current_week) => AppState {
            current_week,
            ..state
        },
        Action::SetSettings(settings) => AppState { settings, ..state },
        Action::SetFilters(filters) => AppState { filters, ..state },
    }
}
