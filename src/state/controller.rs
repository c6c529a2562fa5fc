//! Controller binding the repository to the reducer state.
//!
//! Every mutation follows the same shape: call the repository, and only
//! when it succeeds dispatch the matching [`Action`]. Failures set the
//! state error and bubble the repository error to the caller.

use chrono::{Days, NaiveDate};

use crate::calendar::{Clock, SystemClock, week_days, week_start};
use crate::domain::category::{Category, CategoryPatch, NewCategory};
use crate::domain::entry::{Entry, EntryPatch, NewEntry};
use crate::domain::settings::Settings;
use crate::domain::types::{CategoryId, EntryId, SlotHour};
use crate::repository::{
    BlobRepository, CategoryReader, CategoryWriter, EntryReader, EntryWriter, PlanReader,
    PlanWriter, RepositoryError, RepositoryResult,
};
use crate::slots::{DaySlots, week_time_slots};
use crate::state::{Action, AppState, ChartFilters, reduce};
use crate::stats::{WeeklyStats, weekly_stats};
use crate::storage::KeyValueStore;

/// Owns the repository and the state snapshot the UI renders from.
pub struct AppController<S: KeyValueStore, C: Clock = SystemClock> {
    repo: BlobRepository<S, C>,
    clock: C,
    state: AppState,
}

impl<S: KeyValueStore> AppController<S> {
    /// Controller reading the wall clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock + Clone> AppController<S, C> {
    /// Controller with an explicit clock, pinned in tests.
    pub fn with_clock(store: S, clock: C) -> Self {
        let repo = BlobRepository::with_clock(store, clock.clone());
        let current_week = week_start(clock.today(), Settings::default().week_starts_on);
        Self {
            repo,
            clock,
            state: AppState::new(current_week),
        }
    }

    /// The current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn apply(&mut self, action: Action) {
        self.state = reduce(self.state.clone(), action);
    }

    fn fail<T>(&mut self, context: &str, err: RepositoryError) -> RepositoryResult<T> {
        log::error!("{context}: {err}");
        self.apply(Action::SetError(Some(err.to_string())));
        Err(err)
    }

    /// Loads persisted data into the state and anchors the displayed week.
    pub fn initialize(&mut self) -> RepositoryResult<()> {
        if let Err(err) = self.repo.initialize() {
            return self.fail("failed to initialize repository", err);
        }
        self.refresh()?;
        let settings = self.state.settings;
        self.apply(Action::SetCurrentWeek(week_start(
            self.clock.today(),
            settings.week_starts_on,
        )));
        self.apply(Action::SetError(None));
        self.apply(Action::SetLoading(false));
        Ok(())
    }

    /// Re-reads every collection from the repository into the state.
    pub fn refresh(&mut self) -> RepositoryResult<()> {
        let categories = match self.repo.list_categories() {
            Ok(categories) => categories,
            Err(err) => return self.fail("failed to list categories", err),
        };
        let time_entries = match self.repo.list_time_entries() {
            Ok(entries) => entries,
            Err(err) => return self.fail("failed to list time entries", err),
        };
        let planned_entries = match self.repo.list_planned_entries() {
            Ok(entries) => entries,
            Err(err) => return self.fail("failed to list planned entries", err),
        };
        let settings = match self.repo.settings() {
            Ok(settings) => settings,
            Err(err) => return self.fail("failed to read settings", err),
        };
        self.apply(Action::SetCategories(categories));
        self.apply(Action::SetTimeEntries(time_entries));
        self.apply(Action::SetPlannedEntries(planned_entries));
        self.apply(Action::SetSettings(settings));
        Ok(())
    }

    pub fn add_category(&mut self, category: NewCategory) -> RepositoryResult<Category> {
        match self.repo.create_category(category) {
            Ok(created) => {
                self.apply(Action::AddCategory(created.clone()));
                Ok(created)
            }
            Err(err) => self.fail("failed to create category", err),
        }
    }

    pub fn update_category(
        &mut self,
        id: &CategoryId,
        patch: CategoryPatch,
    ) -> RepositoryResult<Category> {
        match self.repo.update_category(id, patch) {
            Ok(updated) => {
                self.apply(Action::UpdateCategory(updated.clone()));
                Ok(updated)
            }
            Err(err) => self.fail("failed to update category", err),
        }
    }

    pub fn delete_category(&mut self, id: &CategoryId) -> RepositoryResult<()> {
        match self.repo.delete_category(id) {
            Ok(()) => {
                self.apply(Action::DeleteCategory(id.clone()));
                Ok(())
            }
            Err(err) => self.fail("failed to delete category", err),
        }
    }

    pub fn upsert_time_entry(&mut self, entry: NewEntry) -> RepositoryResult<Entry> {
        match self.repo.upsert_time_entry(entry) {
            Ok(saved) => {
                self.apply(Action::UpsertTimeEntry(saved.clone()));
                Ok(saved)
            }
            Err(err) => self.fail("failed to upsert time entry", err),
        }
    }

    pub fn delete_time_entry(&mut self, id: &EntryId) -> RepositoryResult<()> {
        match self.repo.delete_time_entry(id) {
            Ok(()) => {
                self.apply(Action::DeleteTimeEntry(id.clone()));
                Ok(())
            }
            Err(err) => self.fail("failed to delete time entry", err),
        }
    }

    pub fn upsert_planned_entry(&mut self, entry: NewEntry) -> RepositoryResult<Entry> {
        match self.repo.upsert_planned_entry(entry) {
            Ok(saved) => {
                self.apply(Action::UpsertPlannedEntry(saved.clone()));
                Ok(saved)
            }
            Err(err) => self.fail("failed to upsert planned entry", err),
        }
    }

    pub fn update_planned_entry(
        &mut self,
        id: &EntryId,
        patch: EntryPatch,
    ) -> RepositoryResult<Entry> {
        match self.repo.update_planned_entry(id, patch) {
            Ok(updated) => {
                self.apply(Action::UpsertPlannedEntry(updated.clone()));
                Ok(updated)
            }
            Err(err) => self.fail("failed to update planned entry", err),
        }
    }

    pub fn delete_planned_entry(&mut self, id: &EntryId) -> RepositoryResult<()> {
        match self.repo.delete_planned_entry(id) {
            Ok(()) => {
                self.apply(Action::DeletePlannedEntry(id.clone()));
                Ok(())
            }
            Err(err) => self.fail("failed to delete planned entry", err),
        }
    }

    pub fn update_settings(&mut self, settings: Settings) -> RepositoryResult<Settings> {
        match self.repo.update_settings(settings) {
            Ok(saved) => {
                self.apply(Action::SetSettings(saved));
                Ok(saved)
            }
            Err(err) => self.fail("failed to update settings", err),
        }
    }

    pub fn set_filters(&mut self, filters: ChartFilters) {
        self.apply(Action::SetFilters(filters));
    }

    pub fn set_current_week(&mut self, start: NaiveDate) {
        self.apply(Action::SetCurrentWeek(start));
    }

    pub fn go_to_next_week(&mut self) {
        let next = crate::calendar::next_week(self.state.current_week);
        self.apply(Action::SetCurrentWeek(next));
    }

    pub fn go_to_previous_week(&mut self) {
        let previous = crate::calendar::previous_week(self.state.current_week);
        self.apply(Action::SetCurrentWeek(previous));
    }

    pub fn go_to_today(&mut self) {
        let settings = self.state.settings;
        let start = week_start(self.clock.today(), settings.week_starts_on);
        self.apply(Action::SetCurrentWeek(start));
    }

    /// Restores the seeded default categories and refreshes every
    /// collection, since entries may be dropped along the way.
    pub fn reset_categories(&mut self) -> RepositoryResult<Vec<Category>> {
        match self.repo.reset_categories() {
            Ok(categories) => {
                self.refresh()?;
                Ok(categories)
            }
            Err(err) => self.fail("failed to reset categories", err),
        }
    }

    /// Drops everything and reloads the seeded defaults.
    pub fn clear_all_data(&mut self) -> RepositoryResult<()> {
        if let Err(err) = self.repo.clear_all_data() {
            return self.fail("failed to clear data", err);
        }
        self.refresh()
    }

    /// Deletes every tracked and planned entry in the week starting at
    /// `start`, then refreshes both collections in one pass.
    pub fn clear_week_data(&mut self, start: NaiveDate) -> RepositoryResult<()> {
        let end = start + Days::new(6);
        let tracked = match self.repo.time_entries_for_range(start, end) {
            Ok(entries) => entries,
            Err(err) => return self.fail("failed to list week time entries", err),
        };
        let planned = match self.repo.planned_entries_for_range(start, end) {
            Ok(entries) => entries,
            Err(err) => return self.fail("failed to list week planned entries", err),
        };

        for entry in tracked {
            if let Err(err) = self.repo.delete_time_entry(&entry.id) {
                if !matches!(err, RepositoryError::NotFound { .. }) {
                    return self.fail("failed to clear week time entry", err);
                }
            }
        }
        for entry in planned {
            if let Err(err) = self.repo.delete_planned_entry(&entry.id) {
                if !matches!(err, RepositoryError::NotFound { .. }) {
                    return self.fail("failed to clear week planned entry", err);
                }
            }
        }
        self.refresh()
    }

    /// Deletes whatever occupies one grid cell in both collections.
    pub fn clear_cell_data(&mut self, date: NaiveDate, hour: SlotHour) -> RepositoryResult<()> {
        let tracked = match self.repo.time_entry_at(date, hour) {
            Ok(entry) => entry,
            Err(err) => return self.fail("failed to read cell time entry", err),
        };
        let planned = match self.repo.planned_entry_at(date, hour) {
            Ok(entry) => entry,
            Err(err) => return self.fail("failed to read cell planned entry", err),
        };

        if let Some(entry) = tracked {
            if let Err(err) = self.repo.delete_time_entry(&entry.id) {
                if !matches!(err, RepositoryError::NotFound { .. }) {
                    return self.fail("failed to clear cell time entry", err);
                }
            }
            self.apply(Action::DeleteTimeEntry(entry.id));
        }
        if let Some(entry) = planned {
            if let Err(err) = self.repo.delete_planned_entry(&entry.id) {
                if !matches!(err, RepositoryError::NotFound { .. }) {
                    return self.fail("failed to clear cell planned entry", err);
                }
            }
            self.apply(Action::DeletePlannedEntry(entry.id));
        }
        Ok(())
    }

    /// The grid for the displayed week, derived from the current state.
    pub fn week_grid(&self) -> Vec<DaySlots<'_>> {
        let days = week_days(self.state.current_week);
        let now = self.clock.now().naive_utc();
        week_time_slots(&days, &self.state.time_entries, &self.state.planned_entries, now)
    }

    /// Summary figures for the displayed week, honoring chart filters.
    pub fn week_stats(&self) -> WeeklyStats {
        let days = week_days(self.state.current_week);
        let (from, to) = (days[0], days[6]);
        let entries: Vec<Entry> = self
            .state
            .time_entries
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .filter(|e| self.state.filters.matches(e))
            .cloned()
            .collect();
        weekly_stats(&entries, &self.state.categories)
    }
}
