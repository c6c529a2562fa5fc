use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::entry::NewEntry;
use crate::domain::types::{CategoryId, Description, SlotHour, TypeConstraintError};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize, Validate)]
pub struct EntryForm {
    pub date: String,
    pub hour: u8,
    #[validate(length(min = 1))]
    pub category_id: String,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Error)]
pub enum EntryFormError {
    #[error("Entry form validation failed: {0}")]
    Validation(String),
    #[error("Entry form contains invalid data: {0}")]
    Constraint(String),
    #[error("Entry form date is not an ISO date: {0}")]
    InvalidDate(String),
}

impl From<ValidationErrors> for EntryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for EntryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::Constraint(value.to_string())
    }
}

impl TryFrom<EntryForm> for NewEntry {
    type Error = EntryFormError;

    fn try_from(value: EntryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let date = NaiveDate::parse_from_str(&value.date, DATE_FORMAT)
            .map_err(|_| EntryFormError::InvalidDate(value.date.clone()))?;
        let description = match value.description.trim() {
            "" => None,
            text => Some(Description::new(text)?),
        };

        Ok(Self {
            date,
            hour: SlotHour::new(value.hour)?,
            category_id: CategoryId::new(value.category_id)?,
            is_important: value.is_important,
            is_urgent: value.is_urgent,
            description,
        })
    }
}
