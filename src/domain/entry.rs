use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, Description, EntryId, SlotHour};

/// A single hour of tracked (or planned) activity on the grid.
///
/// The same record shape backs both the actual and the planned collection;
/// which collection it lives in carries the meaning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub hour: SlotHour,
    pub category_id: CategoryId,
    pub is_important: bool,
    pub is_urgent: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<Description>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Grid coordinate of this entry.
    pub fn slot(&self) -> (NaiveDate, SlotHour) {
        (self.date, self.hour)
    }

    /// Eisenhower quadrant derived from the importance/urgency flags.
    pub fn quadrant(&self) -> Quadrant {
        Quadrant::from_flags(self.is_important, self.is_urgent)
    }
}

/// Data required to insert or upsert an [`Entry`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub hour: SlotHour,
    pub category_id: CategoryId,
    pub is_important: bool,
    pub is_urgent: bool,
    pub description: Option<Description>,
}

/// Partial update applied to an existing [`Entry`].
///
/// `description` is doubly optional so a patch can distinguish "leave as is"
/// (`None`) from "clear the note" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub category_id: Option<CategoryId>,
    pub is_important: Option<bool>,
    pub is_urgent: Option<bool>,
    pub description: Option<Option<Description>>,
}

/// Eisenhower matrix quadrant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    DoFirst,
    Schedule,
    Delegate,
    Eliminate,
}

impl Quadrant {
    /// Maps the importance/urgency flags onto a quadrant.
    pub const fn from_flags(is_important: bool, is_urgent: bool) -> Self {
        match (is_important, is_urgent) {
            (true, true) => Self::DoFirst,
            (true, false) => Self::Schedule,
            (false, true) => Self::Delegate,
            (false, false) => Self::Eliminate,
        }
    }

    /// Short tag, e.g. `Q1`.
    pub const fn short(self) -> &'static str {
        match self {
            Self::DoFirst => "Q1",
            Self::Schedule => "Q2",
            Self::Delegate => "Q3",
            Self::Eliminate => "Q4",
        }
    }

    /// Full display label, e.g. `Q1 (Do First)`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::DoFirst => "Q1 (Do First)",
            Self::Schedule => "Q2 (Schedule)",
            Self::Delegate => "Q3 (Delegate)",
            Self::Eliminate => "Q4 (Eliminate)",
        }
    }
}
