//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// A color was not a `#RRGGBB` hex string.
    #[error("invalid hex color: {0}")]
    InvalidColor(String),
    /// An hour fell outside the tracked day window.
    #[error("hour {0} is outside the tracked range 9..=22")]
    InvalidHour(u8),
    /// A week start day was not in 0..=6.
    #[error("week start {0} must be between 0 (Sunday) and 6 (Saturday)")]
    InvalidWeekStart(u8),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate string-backed identifier newtypes with uuid generation.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier, rejecting empty values.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximum number of characters accepted by [`Self::new`].
            pub const MAX_LEN: usize = $max;

            /// Constructs a trimmed, non-empty value within the length limit.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if trimmed.chars().count() > Self::MAX_LEN {
                    return Err(TypeConstraintError::TooLong {
                        field: $field,
                        max: Self::MAX_LEN,
                    });
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(CategoryId, "Unique identifier for a category.", "category id");
id_newtype!(EntryId, "Unique identifier for a grid entry.", "entry id");

bounded_string_newtype!(
    CategoryName,
    "Category display name, non-empty and at most 50 characters.",
    "category name",
    50
);
bounded_string_newtype!(
    Description,
    "Free-form entry note, non-empty and at most 200 characters.",
    "description",
    200
);

/// Hex color in `#RRGGBB` form, casing preserved as given.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Validates a `#RRGGBB` string, accepting either hex digit case.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let trimmed = value.trim();
        let mut chars = trimmed.chars();
        let valid = chars.next() == Some('#')
            && trimmed.chars().skip(1).count() == 6
            && chars.all(|c| c.is_ascii_hexdigit());
        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(TypeConstraintError::InvalidColor(value))
        }
    }

    /// Borrow the color as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }

    fn channel(&self, offset: usize) -> f64 {
        // Constructor guarantees six hex digits after '#'.
        u8::from_str_radix(&self.0[1 + offset..3 + offset], 16).unwrap_or(0) as f64
    }

    /// Text color with readable contrast against this background.
    ///
    /// Perceived luminance is `(0.299 R + 0.587 G + 0.114 B) / 255`; values
    /// above 0.5 get black text, everything else white.
    pub fn contrast_color(&self) -> &'static str {
        let luminance =
            (0.299 * self.channel(0) + 0.587 * self.channel(2) + 0.114 * self.channel(4)) / 255.0;
        if luminance > 0.5 { "#000000" } else { "#FFFFFF" }
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for HexColor {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for HexColor {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

/// Hour slot within the tracked day window (9:00 through 22:00).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SlotHour(u8);

/// Number of trackable hour slots in a full week.
pub const WEEK_HOURS: usize = SlotHour::PER_DAY * 7;

impl SlotHour {
    /// First trackable hour of the day.
    pub const START: u8 = 9;
    /// Last trackable hour of the day.
    pub const END: u8 = 22;
    /// Number of slots per day.
    pub const PER_DAY: usize = (Self::END - Self::START + 1) as usize;

    /// Validates an hour against the tracked window.
    pub fn new(value: u8) -> Result<Self, TypeConstraintError> {
        if (Self::START..=Self::END).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidHour(value))
        }
    }

    /// Returns the raw 24-hour clock value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterates every trackable hour in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::START..=Self::END).map(Self)
    }

    /// Renders the hour on a 12-hour clock, e.g. `9 AM` or `1 PM`.
    pub fn format_12h(self) -> String {
        match self.0 {
            12 => "12 PM".to_string(),
            h if h > 12 => format!("{} PM", h - 12),
            h => format!("{h} AM"),
        }
    }
}

impl Display for SlotHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for SlotHour {
    type Error = TypeConstraintError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlotHour> for u8 {
    fn from(value: SlotHour) -> Self {
        value.0
    }
}

impl PartialEq<u8> for SlotHour {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

impl PartialEq<SlotHour> for u8 {
    fn eq(&self, other: &SlotHour) -> bool {
        *self == other.0
    }
}
