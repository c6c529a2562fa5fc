use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, HexColor};

/// Palette offered when creating categories.
pub const CATEGORY_COLORS: [&str; 12] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#F97316", "#06B6D4", "#84CC16",
    "#EC4899", "#6B7280", "#14B8A6", "#F43F5E",
];

/// Canonical activity category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub color: HexColor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub color: HexColor,
}

/// Partial update applied to an existing [`Category`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<CategoryName>,
    pub color: Option<HexColor>,
}

/// Categories seeded into a fresh data blob.
///
/// Identifiers are stable slugs so a reset reproduces the same records.
pub fn default_categories(now: DateTime<Utc>) -> Vec<Category> {
    const SEED: [(&str, &str, &str); 8] = [
        ("default-exercise", "Exercise", "#10B981"),
        ("default-family-social", "Family/Social", "#F59E0B"),
        ("default-fun", "Fun", "#8B5CF6"),
        ("default-reading", "Reading", "#06B6D4"),
        ("default-study-job", "Study/Job", "#EF4444"),
        ("default-study-nonjob", "Study/NonJob", "#10B981"),
        ("default-work-coding", "Work/Coding", "#3B82F6"),
        ("default-work-noncoding", "Work/NonCoding", "#F97316"),
    ];

    SEED.iter()
        .filter_map(|(id, name, color)| {
            // Seed literals are known-valid; a failed constructor would only
            // drop the seed entry.
            Some(Category {
                id: CategoryId::new(*id).ok()?,
                name: CategoryName::new(*name).ok()?,
                color: HexColor::new(*color).ok()?,
                created_at: now,
                updated_at: now,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::HexColor;

    #[test]
    fn seeds_eight_categories() {
        let now = Utc::now();
        let defaults = default_categories(now);
        assert_eq!(defaults.len(), 8);
        let exercise = defaults
            .iter()
            .find(|c| c.name.as_str() == "Exercise")
            .expect("Exercise should be seeded");
        assert_eq!(exercise.color.as_str(), "#10B981");
        assert_eq!(exercise.created_at, now);
    }

    #[test]
    fn seeded_identifiers_are_distinct() {
        let defaults = default_categories(Utc::now());
        let mut ids: Vec<&str> = defaults.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn palette_colors_are_valid() {
        for color in CATEGORY_COLORS {
            assert!(HexColor::new(color).is_ok(), "bad palette entry {color}");
        }
    }
}
