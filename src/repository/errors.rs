use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::storage::StorageError;

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An operation ran before [`initialize`](crate::repository::BlobRepository::initialize).
    #[error("repository is not initialized")]
    NotInitialized,
    /// The addressed record does not exist.
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },
    /// Another category already uses this name (case-insensitive).
    #[error("category name already in use: {0}")]
    DuplicateCategoryName(String),
    /// The category is still referenced by tracked or planned entries.
    #[error("category is in use: {0}")]
    CategoryInUse(String),
    /// An entry referenced a category that does not exist.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// A constrained domain type rejected a value.
    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
