//! Weekly summary figures derived from tracked entries.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::entry::{Entry, Quadrant};
use crate::domain::types::{CategoryId, WEEK_HOURS};

/// Name and color shown for entries whose category no longer exists.
const UNKNOWN_NAME: &str = "Unknown";
const UNKNOWN_COLOR: &str = "#6B7280";

/// Hours tracked against one category within a week.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category_id: CategoryId,
    pub name: String,
    pub color: String,
    pub hours: usize,
    pub percentage: f64,
}

/// Entry counts per Eisenhower quadrant.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct QuadrantCounts {
    pub q1: usize,
    pub q2: usize,
    pub q3: usize,
    pub q4: usize,
}

impl QuadrantCounts {
    fn bump(&mut self, quadrant: Quadrant) {
        match quadrant {
            Quadrant::DoFirst => self.q1 += 1,
            Quadrant::Schedule => self.q2 += 1,
            Quadrant::Delegate => self.q3 += 1,
            Quadrant::Eliminate => self.q4 += 1,
        }
    }
}

/// Aggregate figures for one week of tracking.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub total_tracked: usize,
    pub tracking_percentage: f64,
    pub by_category: Vec<CategoryShare>,
    pub quadrants: QuadrantCounts,
    pub most_used: Option<CategoryShare>,
}

/// Share of `value` in `total` as a percentage rounded to `precision`
/// decimals. A zero total yields zero.
pub fn percentage(value: usize, total: usize, precision: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let factor = 10f64.powi(precision as i32);
    ((value as f64 / total as f64) * 100.0 * factor).round() / factor
}

/// Summarizes one week of tracked entries.
///
/// `entries` should already be restricted to the week in question; the
/// tracking percentage is taken against the full [`WEEK_HOURS`] window.
pub fn weekly_stats(entries: &[Entry], categories: &[Category]) -> WeeklyStats {
    let names: HashMap<&CategoryId, &Category> =
        categories.iter().map(|c| (&c.id, c)).collect();

    let mut hours_by_category: HashMap<&CategoryId, usize> = HashMap::new();
    let mut quadrants = QuadrantCounts::default();
    for entry in entries {
        *hours_by_category.entry(&entry.category_id).or_default() += 1;
        quadrants.bump(entry.quadrant());
    }

    let mut by_category: Vec<CategoryShare> = hours_by_category
        .into_iter()
        .map(|(id, hours)| {
            let (name, color) = names.get(id).map_or_else(
                || (UNKNOWN_NAME.to_string(), UNKNOWN_COLOR.to_string()),
                |c| (c.name.as_str().to_string(), c.color.as_str().to_string()),
            );
            CategoryShare {
                category_id: id.clone(),
                name,
                color,
                hours,
                percentage: percentage(hours, entries.len(), 1),
            }
        })
        .collect();
    by_category.sort_by(|a, b| b.hours.cmp(&a.hours).then_with(|| a.name.cmp(&b.name)));

    WeeklyStats {
        total_tracked: entries.len(),
        tracking_percentage: percentage(entries.len(), WEEK_HOURS, 1),
        most_used: by_category.first().cloned(),
        by_category,
        quadrants,
    }
}
