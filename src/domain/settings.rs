use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Calendar layout the UI opens with.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    Daily,
    #[default]
    Weekly,
}

/// Color scheme preference.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Interaction mode the grid opens with.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    Planning,
    #[default]
    Tracking,
    Comparison,
}

/// First day of the week, stored as 0 (Sunday) through 6 (Saturday).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekStart(u8);

impl WeekStart {
    /// Validates a day index in 0..=6.
    pub fn new(value: u8) -> Result<Self, TypeConstraintError> {
        if value <= 6 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidWeekStart(value))
        }
    }

    /// Returns the raw day index.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Chrono weekday matching this start day.
    pub const fn weekday(self) -> Weekday {
        match self.0 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for WeekStart {
    type Error = TypeConstraintError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeekStart> for u8 {
    fn from(value: WeekStart) -> Self {
        value.0
    }
}

/// User preferences persisted alongside the tracked data.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_view: DefaultView,
    pub theme: Theme,
    pub week_starts_on: WeekStart,
    pub default_mode: AppMode,
}
