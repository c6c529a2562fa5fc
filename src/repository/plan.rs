use chrono::NaiveDate;

use crate::calendar::Clock;
use crate::domain::entry::{Entry, EntryPatch, NewEntry};
use crate::domain::types::{EntryId, SlotHour};
use crate::repository::{BlobRepository, PlanReader, PlanWriter, RepositoryError, RepositoryResult};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore, C: Clock> PlanReader for BlobRepository<S, C> {
    fn list_planned_entries(&self) -> RepositoryResult<Vec<Entry>> {
        Ok(self.ensure_loaded()?.planned_entries.clone())
    }

    fn planned_entries_for_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Entry>> {
        Ok(self
            .ensure_loaded()?
            .planned_entries
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .cloned()
            .collect())
    }

    fn planned_entry_at(
        &self,
        date: NaiveDate,
        hour: SlotHour,
    ) -> RepositoryResult<Option<Entry>> {
        Ok(self
            .ensure_loaded()?
            .planned_entries
            .iter()
            .find(|e| e.slot() == (date, hour))
            .cloned())
    }
}

impl<S: KeyValueStore, C: Clock> PlanWriter for BlobRepository<S, C> {
    fn upsert_planned_entry(&mut self, entry: NewEntry) -> RepositoryResult<Entry> {
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
        data.planned_entries.retain(|e| e.slot() != record.slot());
        data.planned_entries.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn update_planned_entry(&mut self, id: &EntryId, patch: EntryPatch) -> RepositoryResult<Entry> {
        let now = self.now();
        let data = self.data_mut()?;

        if let Some(category_id) = &patch.category_id {
            if !data.categories.iter().any(|c| &c.id == category_id) {
                return Err(RepositoryError::UnknownCategory(
                    category_id.as_str().to_string(),
                ));
            }
        }

        let entry = data
            .planned_entries
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| RepositoryError::NotFound {
                what: "planned entry",
                id: id.as_str().to_string(),
            })?;

        if let Some(category_id) = patch.category_id {
            entry.category_id = category_id;
        }
        if let Some(is_important) = patch.is_important {
            entry.is_important = is_important;
        }
        if let Some(is_urgent) = patch.is_urgent {
            entry.is_urgent = is_urgent;
        }
        if let Some(description) = patch.description {
            entry.description = description;
        }
        entry.updated_at = now;

        let updated = entry.clone();
        self.persist()?;
        Ok(updated)
    }

    fn delete_planned_entry(&mut self, id: &EntryId) -> RepositoryResult<()> {
        let data = self.data_mut()?;
        let position = data
            .planned_entries
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| RepositoryError::NotFound {
                what: "planned entry",
                id: id.as_str().to_string(),
            })?;
        data.planned_entries.remove(position);
        self.persist()
    }
}
