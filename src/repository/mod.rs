//! Repository over the persisted data blob.
//!
//! [`BlobRepository`] keeps the whole [`AppData`] document in memory and
//! writes it back through a [`KeyValueStore`] after every mutation. Reads
//! and writes are split into per-collection traits so callers can depend on
//! exactly the capability they need.

use chrono::NaiveDate;

use crate::calendar::{Clock, SystemClock};
use crate::domain::category::{Category, CategoryPatch, NewCategory};
use crate::domain::entry::{Entry, EntryPatch, NewEntry};
use crate::domain::settings::Settings;
use crate::domain::types::{CategoryId, EntryId, SlotHour};
use crate::storage::{AppData, KeyValueStore, StorageService};

pub mod category;
pub mod entry;
pub mod errors;
pub mod plan;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository backed by a single JSON blob in a key/value store.
///
/// The blob is loaded once by [`initialize`](Self::initialize) and cached;
/// every mutation updates the cache first and then persists it.
pub struct BlobRepository<S: KeyValueStore, C: Clock = SystemClock> {
    storage: StorageService<S>,
    clock: C,
    data: Option<AppData>,
}

impl<S: KeyValueStore> BlobRepository<S> {
    /// Create a repository reading the wall clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> BlobRepository<S, C> {
    /// Create a repository with an explicit clock.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            storage: StorageService::new(store),
            clock,
            data: None,
        }
    }

    /// Loads the blob into memory. Safe to call repeatedly; only the first
    /// call reads the store.
    pub fn initialize(&mut self) -> RepositoryResult<()> {
        if self.data.is_none() {
            self.data = Some(self.storage.load(self.clock.now())?);
        }
        Ok(())
    }

    /// Drops all stored data and reloads the seeded defaults.
    pub fn clear_all_data(&mut self) -> RepositoryResult<()> {
        self.ensure_loaded()?;
        self.storage.clear()?;
        self.data = Some(self.storage.load(self.clock.now())?);
        Ok(())
    }

    /// Snapshot of the current blob.
    pub fn app_data(&self) -> RepositoryResult<AppData> {
        Ok(self.ensure_loaded()?.clone())
    }

    /// Current user settings.
    pub fn settings(&self) -> RepositoryResult<Settings> {
        Ok(self.ensure_loaded()?.settings)
    }

    /// Replaces the user settings.
    pub fn update_settings(&mut self, settings: Settings) -> RepositoryResult<Settings> {
        self.data_mut()?.settings = settings;
        self.persist()?;
        Ok(settings)
    }

    pub(crate) fn ensure_loaded(&self) -> RepositoryResult<&AppData> {
        self.data.as_ref().ok_or(RepositoryError::NotInitialized)
    }

    pub(crate) fn data_mut(&mut self) -> RepositoryResult<&mut AppData> {
        self.data.as_mut().ok_or(RepositoryError::NotInitialized)
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Writes the cached blob back to the store.
    ///
    /// On failure memory stays ahead of disk; the next successful save
    /// reconciles both.
    pub(crate) fn persist(&mut self) -> RepositoryResult<()> {
        let data = self.data.as_ref().ok_or(RepositoryError::NotInitialized)?;
        if let Err(err) = self.storage.save(data) {
            log::error!("failed to persist data blob: {err}");
            return Err(err.into());
        }
        Ok(())
    }
}

/// Read-only operations for categories.
pub trait CategoryReader {
    /// List every category.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for categories.
pub trait CategoryWriter {
    /// Persist a new category, enforcing case-insensitive name uniqueness.
    fn create_category(&mut self, category: NewCategory) -> RepositoryResult<Category>;
    /// Apply a partial update to an existing category.
    fn update_category(&mut self, id: &CategoryId, patch: CategoryPatch)
    -> RepositoryResult<Category>;
    /// Delete a category that no entry references.
    fn delete_category(&mut self, id: &CategoryId) -> RepositoryResult<()>;
    /// Restore the seeded default categories, dropping entries whose
    /// category no longer resolves.
    fn reset_categories(&mut self) -> RepositoryResult<Vec<Category>>;
}

/// Read-only operations for tracked time entries.
pub trait EntryReader {
    /// List every tracked entry.
    fn list_time_entries(&self) -> RepositoryResult<Vec<Entry>>;
    /// Tracked entries with dates in the inclusive range.
    fn time_entries_for_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Entry>>;
    /// The tracked entry occupying a grid slot, if any.
    fn time_entry_at(&self, date: NaiveDate, hour: SlotHour) -> RepositoryResult<Option<Entry>>;
}

/// Write operations for tracked time entries.
pub trait EntryWriter {
    /// Insert an entry, replacing any record already occupying its slot.
    fn upsert_time_entry(&mut self, entry: NewEntry) -> RepositoryResult<Entry>;
    /// Delete a tracked entry by identifier.
    fn delete_time_entry(&mut self, id: &EntryId) -> RepositoryResult<()>;
}

/// Read-only operations for planned entries.
pub trait PlanReader {
    /// List every planned entry.
    fn list_planned_entries(&self) -> RepositoryResult<Vec<Entry>>;
    /// Planned entries with dates in the inclusive range.
    fn planned_entries_for_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Entry>>;
    /// The planned entry occupying a grid slot, if any.
    fn planned_entry_at(&self, date: NaiveDate, hour: SlotHour)
    -> RepositoryResult<Option<Entry>>;
}

/// Write operations for planned entries.
pub trait PlanWriter {
    /// Insert a planned entry, replacing any record already occupying its
    /// slot.
    fn upsert_planned_entry(&mut self, entry: NewEntry) -> RepositoryResult<Entry>;
    /// Apply a partial update to an existing planned entry.
    fn update_planned_entry(&mut self, id: &EntryId, patch: EntryPatch)
    -> RepositoryResult<Entry>;
    /// Delete a planned entry by identifier.
    fn delete_planned_entry(&mut self, id: &EntryId) -> RepositoryResult<()>;
}
