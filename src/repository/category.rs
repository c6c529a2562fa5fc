use crate::calendar::Clock;
use crate::domain::category::{Category, CategoryPatch, NewCategory, default_categories};
use crate::domain::types::CategoryId;
use crate::repository::{
    BlobRepository, CategoryReader, CategoryWriter, RepositoryError, RepositoryResult,
};
use crate::storage::KeyValueStore;

fn name_taken(categories: &[Category], name: &str, exclude: Option<&CategoryId>) -> bool {
    let needle = name.to_lowercase();
    categories
        .iter()
        .filter(|c| exclude.is_none_or(|id| &c.id != id))
        .any(|c| c.name.as_str().to_lowercase() == needle)
}

impl<S: KeyValueStore, C: Clock> CategoryReader for BlobRepository<S, C> {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.ensure_loaded()?.categories.clone())
    }

    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .ensure_loaded()?
            .categories
            .iter()
            .find(|c| &c.id == id)
            .cloned())
    }
}

impl<S: KeyValueStore, C: Clock> CategoryWriter for BlobRepository<S, C> {
    fn create_category(&mut self, category: NewCategory) -> RepositoryResult<Category> {
        let now = self.now();
        let data = self.data_mut()?;

        if name_taken(&data.categories, category.name.as_str(), None) {
            return Err(RepositoryError::DuplicateCategoryName(
                category.name.into_inner(),
            ));
        }

        let record = Category {
            id: CategoryId::generate(),
            name: category.name,
            color: category.color,
            created_at: now,
            updated_at: now,
        };
        data.categories.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn update_category(
        &mut self,
        id: &CategoryId,
        patch: CategoryPatch,
    ) -> RepositoryResult<Category> {
        let now = self.now();
        let data = self.data_mut()?;

        if let Some(name) = &patch.name {
            if name_taken(&data.categories, name.as_str(), Some(id)) {
                return Err(RepositoryError::DuplicateCategoryName(
                    name.as_str().to_string(),
                ));
            }
        }

        let category = data
            .categories
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound {
                what: "category",
                id: id.as_str().to_string(),
            })?;

        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        category.updated_at = now;

        let updated = category.clone();
        self.persist()?;
        Ok(updated)
    }

    fn delete_category(&mut self, id: &CategoryId) -> RepositoryResult<()> {
        let data = self.data_mut()?;

        let in_use = data
            .time_entries
            .iter()
            .chain(data.planned_entries.iter())
            .any(|e| &e.category_id == id);
        if in_use {
            return Err(RepositoryError::CategoryInUse(id.as_str().to_string()));
        }

        let position = data
            .categories
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound {
                what: "category",
                id: id.as_str().to_string(),
            })?;
        data.categories.remove(position);
        self.persist()
    }

    fn reset_categories(&mut self) -> RepositoryResult<Vec<Category>> {
        let now = self.now();
        let data = self.data_mut()?;

        data.categories = default_categories(now);

        let resolves = |categories: &[Category], e: &crate::domain::entry::Entry| {
            categories.iter().any(|c| c.id == e.category_id)
        };
        let before = data.time_entries.len() + data.planned_entries.len();
        let categories = data.categories.clone();
        data.time_entries.retain(|e| resolves(&categories, e));
        data.planned_entries.retain(|e| resolves(&categories, e));
        let dropped = before - data.time_entries.len() - data.planned_entries.len();
        if dropped > 0 {
            log::warn!("dropped {dropped} entries referencing removed categories during reset");
        }

        self.persist()?;
        Ok(categories)
    }
}
