//! Pure derivation of the weekly grid from tracked and planned entries.
//!
//! Nothing here touches storage or the clock; callers pass the reference
//! time explicitly so the derivation stays deterministic.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::domain::entry::Entry;
use crate::domain::types::SlotHour;

/// How a grid slot's plan relates to what actually happened.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Nothing planned, nothing tracked.
    Empty,
    /// Planned and still in the future.
    Planned,
    /// Planned, the hour has passed, nothing was tracked.
    Missed,
    /// Tracked without a plan.
    Unplanned,
    /// Tracked the planned category.
    Completed,
    /// Tracked a different category than planned.
    Deviated,
}

/// One hour cell of the grid with its resolved entries.
#[derive(Clone, Debug, Serialize)]
pub struct TimeSlot<'a> {
    pub date: NaiveDate,
    pub hour: SlotHour,
    pub actual: Option<&'a Entry>,
    pub planned: Option<&'a Entry>,
    pub status: ExecutionStatus,
}

/// A day column of the grid, always [`SlotHour::PER_DAY`] slots.
#[derive(Clone, Debug, Serialize)]
pub struct DaySlots<'a> {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot<'a>>,
}

/// Classifies a slot from its resolved entries and whether its hour has
/// already ended.
pub fn slot_status(
    actual: Option<&Entry>,
    planned: Option<&Entry>,
    in_past: bool,
) -> ExecutionStatus {
    match (actual, planned) {
        (None, None) => ExecutionStatus::Empty,
        (None, Some(_)) if in_past => ExecutionStatus::Missed,
        (None, Some(_)) => ExecutionStatus::Planned,
        (Some(_), None) => ExecutionStatus::Unplanned,
        (Some(actual), Some(planned)) if actual.category_id == planned.category_id => {
            ExecutionStatus::Completed
        }
        (Some(_), Some(_)) => ExecutionStatus::Deviated,
    }
}

fn slot_end(date: NaiveDate, hour: SlotHour) -> NaiveDateTime {
    let end_hour = u32::from(hour.get()) + 1;
    date.and_time(NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap_or(NaiveTime::MIN))
}

fn by_slot(entries: &[Entry]) -> HashMap<(NaiveDate, SlotHour), &Entry> {
    entries.iter().map(|e| (e.slot(), e)).collect()
}

/// Builds the full grid for `days`, resolving each slot against the
/// tracked and planned collections.
///
/// `now` is the reference time that separates [`ExecutionStatus::Planned`]
/// from [`ExecutionStatus::Missed`].
pub fn week_time_slots<'a>(
    days: &[NaiveDate],
    time_entries: &'a [Entry],
    planned_entries: &'a [Entry],
    now: NaiveDateTime,
) -> Vec<DaySlots<'a>> {
    let actual = by_slot(time_entries);
    let planned = by_slot(planned_entries);

    days.iter()
        .map(|&date| DaySlots {
            date,
            slots: SlotHour::all()
                .map(|hour| {
                    let actual = actual.get(&(date, hour)).copied();
                    let planned = planned.get(&(date, hour)).copied();
                    let in_past = slot_end(date, hour) <= now;
                    TimeSlot {
                        date,
                        hour,
                        actual,
                        planned,
                        status: slot_status(actual, planned, in_past),
                    }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::week_days;
    use crate::domain::types::{CategoryId, EntryId};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn entry(date: NaiveDate, hour: u8, category: &str) -> Entry {
        let now = Utc::now();
        Entry {
            id: EntryId::generate(),
            date,
            hour: SlotHour::new(hour).expect("valid hour"),
            category_id: CategoryId::new(category).expect("valid id"),
            is_important: false,
            is_urgent: false,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn noon(d: NaiveDate) -> NaiveDateTime {
        d.and_time(NaiveTime::from_hms_opt(12, 0, 0).expect("valid time"))
    }

    #[test]
    fn grid_has_seven_days_of_fourteen_slots() {
        let days = week_days(date(2026, 1, 5));
        let grid = week_time_slots(&days, &[], &[], noon(date(2026, 1, 8)));
        assert_eq!(grid.len(), 7);
        for day in &grid {
            assert_eq!(day.slots.len(), SlotHour::PER_DAY);
        }
    }

    #[test]
    fn classifies_every_status() {
        let monday = date(2026, 1, 5);
        let days = [monday];
        let work = "cat-work";
        let rest = "cat-rest";

        let tracked = vec![
            entry(monday, 9, work),
            entry(monday, 10, work),
            entry(monday, 11, work),
        ];
        let planned = vec![
            entry(monday, 9, work),
            entry(monday, 10, rest),
            entry(monday, 12, work),
            entry(monday, 13, work),
        ];

        let grid = week_time_slots(&days, &tracked, &planned, noon(monday));
        let slots = &grid[0].slots;
        let status_at = |hour: u8| {
            slots
                .iter()
                .find(|s| s.hour == hour)
                .map(|s| s.status)
                .expect("slot exists")
        };

        assert_eq!(status_at(9), ExecutionStatus::Completed);
        assert_eq!(status_at(10), ExecutionStatus::Deviated);
        assert_eq!(status_at(11), ExecutionStatus::Unplanned);
        assert_eq!(status_at(12), ExecutionStatus::Planned);
        assert_eq!(status_at(13), ExecutionStatus::Planned);
        assert_eq!(status_at(14), ExecutionStatus::Empty);
    }

    #[test]
    fn past_plan_without_tracking_is_missed() {
        let monday = date(2026, 1, 5);
        let planned = vec![entry(monday, 9, "cat")];
        let grid = week_time_slots(&[monday], &[], &planned, noon(monday));
        assert_eq!(grid[0].slots[0].status, ExecutionStatus::Missed);
    }

    #[test]
    fn slot_ending_exactly_now_counts_as_past() {
        let monday = date(2026, 1, 5);
        let planned = vec![entry(monday, 11, "cat")];
        // 11:00 slot ends at 12:00, the reference instant.
        let grid = week_time_slots(&[monday], &[], &planned, noon(monday));
        let slot = grid[0]
            .slots
            .iter()
            .find(|s| s.hour == 11)
            .expect("slot exists");
        assert_eq!(slot.status, ExecutionStatus::Missed);
    }

    #[test]
    fn derivation_is_input_order_independent() {
        let monday = date(2026, 1, 5);
        let mut tracked = vec![entry(monday, 9, "a"), entry(monday, 10, "b")];
        let planned = vec![entry(monday, 9, "a")];
        let statuses = |grid: &[DaySlots]| -> Vec<ExecutionStatus> {
            grid[0].slots.iter().map(|s| s.status).collect()
        };
        let forward = week_time_slots(&[monday], &tracked, &planned, noon(monday));
        let forward_statuses = statuses(&forward);
        tracked.reverse();
        let reversed = week_time_slots(&[monday], &tracked, &planned, noon(monday));
        assert_eq!(forward_statuses, statuses(&reversed));
    }
}
