use chrono::NaiveDate;

use crate::calendar::Clock;
use crate::domain::entry::{Entry, NewEntry};
use crate::domain::types::{EntryId, SlotHour};
use crate::repository::{
    BlobRepository, EntryReader, EntryWriter, RepositoryError, RepositoryResult,
};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore, C: Clock> EntryReader for BlobRepository<S, C> {
    fn list_time_entries(&self) -> RepositoryResult<Vec<Entry>> {
        Ok(self.ensure_loaded()?.time_entries.clone())
    }

    fn time_entries_for_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Entry>> {
        Ok(self
            .ensure_loaded()?
            .time_entries
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .cloned()
            .collect())
    }

    fn time_entry_at(&self, date: NaiveDate, hour: SlotHour) -> RepositoryResult<Option<Entry>> {
        Ok(self
            .ensure_loaded()?
            .time_entries
            .iter()
            .find(|e| e.slot() == (date, hour))
            .cloned())
    }
}

impl<S: KeyValueStore, C: Clock> EntryWriter for BlobRepository<S, C> {
    fn upsert_time_entry(&mut self, entry: NewEntry) -> RepositoryResult<Entry> {
        let now = self.now();
        let data = self.data_mut()?;

        if !data.categories.iter().any(|c| c.id == entry.category_id) {
            return Err(RepositoryError::UnknownCategory(
                entry.category_id.into_inner(),
            ));
        }

        let record = Entry {
            id: EntryId::generate(),
            date: entry.date,
            hour: entry.hour,
            category_id: entry.category_id,
            is_important: entry.is_important,
            is_urgent: entry.is_urgent,
            description: entry.description,
            created_at: now,
            updated_at: now,
        };
        // One entry per slot: replace whatever occupied it.
        data.time_entries.retain(|e| e.slot() != record.slot());
        data.time_entries.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn delete_time_entry(&mut self, id: &EntryId) -> RepositoryResult<()> {
        let data = self.data_mut()?;
        let position = data
            .time_entries
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| RepositoryError::NotFound {
                what: "time entry",
                id: id.as_str().to_string(),
            })?;
        data.time_entries.remove(position);
        self.persist()
    }
}
