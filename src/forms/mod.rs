//! Deserializable input forms and their conversions into domain types.

pub mod categories;
pub mod entries;
