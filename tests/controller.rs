use std::collections::HashSet;

use chrono::NaiveDate;
use timegrid::calendar::FixedClock;
use timegrid::domain::category::NewCategory;
use timegrid::domain::entry::{NewEntry, Quadrant};
use timegrid::domain::settings::{Settings, Theme};
use timegrid::domain::types::{CategoryName, HexColor, SlotHour};
use timegrid::slots::ExecutionStatus;
use timegrid::state::{AppController, ChartFilters};
use timegrid::storage::MemoryStore;

mod common;

fn controller() -> AppController<MemoryStore, FixedClock> {
    common::init_logging();
    let mut controller = AppController::with_clock(MemoryStore::new(), common::midweek_clock());
    controller
        .initialize()
        .expect("controller should initialize");
    controller
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn hour(h: u8) -> SlotHour {
    SlotHour::new(h).expect("valid hour")
}

fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        color: HexColor::new("#3B82F6").expect("valid color"),
    }
}

fn entry_for(category: &timegrid::domain::category::Category, d: NaiveDate, h: u8) -> NewEntry {
    NewEntry {
        date: d,
        hour: hour(h),
        category_id: category.id.clone(),
        is_important: true,
        is_urgent: false,
        description: None,
    }
}

#[test]
fn initialize_loads_defaults_and_anchors_the_week() {
    let controller = controller();
    let state = controller.state();

    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.categories.len(), 8);
    // Wednesday 2026-01-07 belongs to the week starting Monday 2026-01-05.
    assert_eq!(state.current_week, date(2026, 1, 5));
}

#[test]
fn mutations_are_reflected_in_state_after_persistence() {
    let mut controller = controller();

    let category = controller
        .add_category(new_category("Deep Work"))
        .expect("should add category");
    assert!(
        controller
            .state()
            .categories
            .iter()
            .any(|c| c.id == category.id)
    );

    let tracked = controller
        .upsert_time_entry(entry_for(&category, date(2026, 1, 5), 9))
        .expect("should track entry");
    assert_eq!(controller.state().time_entries.len(), 1);

    controller
        .delete_time_entry(&tracked.id)
        .expect("should delete entry");
    assert!(controller.state().time_entries.is_empty());
}

#[test]
fn failed_mutation_sets_the_state_error() {
    let mut controller = controller();

    controller
        .add_category(new_category("Deep Work"))
        .expect("should add category");
    let duplicate = controller.add_category(new_category("deep work"));

    assert!(duplicate.is_err());
    let error = controller.state().error.as_deref().expect("error is set");
    assert!(error.contains("Deep Work") || error.contains("deep work"));

    // The next successful mutation leaves the stale error in place until
    // the caller clears it; state data is still updated.
    controller
        .add_category(new_category("Errands"))
        .expect("should add category");
    assert_eq!(
        controller
            .state()
            .categories
            .iter()
            .filter(|c| c.name.as_str() == "Errands")
            .count(),
        1
    );
}

#[test]
fn week_navigation_moves_in_seven_day_steps() {
    let mut controller = controller();
    assert_eq!(controller.state().current_week, date(2026, 1, 5));

    controller.go_to_next_week();
    assert_eq!(controller.state().current_week, date(2026, 1, 12));

    controller.go_to_previous_week();
    controller.go_to_previous_week();
    assert_eq!(controller.state().current_week, date(2025, 12, 29));

    controller.go_to_today();
    assert_eq!(controller.state().current_week, date(2026, 1, 5));
}

#[test]
fn week_grid_classifies_against_the_fixed_clock() {
    let mut controller = controller();
    let category = controller
        .add_category(new_category("Deep Work"))
        .expect("should add category");
    let other = controller
        .add_category(new_category("Errands"))
        .expect("should add category");

    let monday = date(2026, 1, 5);
    let friday = date(2026, 1, 9);
    controller
        .upsert_time_entry(entry_for(&category, monday, 9))
        .expect("should track entry");
    controller
        .upsert_planned_entry(entry_for(&category, monday, 9))
        .expect("should plan entry");
    controller
        .upsert_planned_entry(entry_for(&other, monday, 10))
        .expect("should plan entry");
    controller
        .upsert_planned_entry(entry_for(&category, friday, 9))
        .expect("should plan future entry");

    let grid = controller.week_grid();
    assert_eq!(grid.len(), 7);

    let status_at = |day: NaiveDate, h: u8| {
        grid.iter()
            .find(|d| d.date == day)
            .expect("day in grid")
            .slots
            .iter()
            .find(|s| s.hour == h)
            .expect("slot in day")
            .status
    };
    assert_eq!(status_at(monday, 9), ExecutionStatus::Completed);
    // Planned Monday 10 AM passed without tracking by the Wednesday clock.
    assert_eq!(status_at(monday, 10), ExecutionStatus::Missed);
    assert_eq!(status_at(friday, 9), ExecutionStatus::Planned);
    assert_eq!(status_at(friday, 10), ExecutionStatus::Empty);
}

#[test]
fn week_stats_honor_chart_filters() {
    let mut controller = controller();
    let work = controller
        .add_category(new_category("Deep Work"))
        .expect("should add category");
    let rest = controller
        .add_category(new_category("Rest"))
        .expect("should add category");

    let monday = date(2026, 1, 5);
    controller
        .upsert_time_entry(entry_for(&work, monday, 9))
        .expect("should track entry");
    controller
        .upsert_time_entry(entry_for(&work, monday, 10))
        .expect("should track entry");
    controller
        .upsert_time_entry(entry_for(&rest, monday, 11))
        .expect("should track entry");
    // Outside the displayed week, never counted.
    controller
        .upsert_time_entry(entry_for(&work, date(2026, 1, 12), 9))
        .expect("should track entry");

    let stats = controller.week_stats();
    assert_eq!(stats.total_tracked, 3);
    let top = stats.most_used.expect("top category exists");
    assert_eq!(top.name, "Deep Work");
    assert_eq!(top.hours, 2);

    let mut hidden = HashSet::new();
    hidden.insert(work.id.clone());
    controller.set_filters(ChartFilters {
        hidden_categories: hidden,
        quadrants: None,
        date_range: None,
    });
    let filtered = controller.week_stats();
    assert_eq!(filtered.total_tracked, 1);
    assert_eq!(
        filtered.most_used.expect("top category exists").name,
        "Rest"
    );

    controller.set_filters(ChartFilters {
        hidden_categories: HashSet::new(),
        quadrants: Some([Quadrant::DoFirst].into_iter().collect()),
        date_range: None,
    });
    // Every tracked entry is important and not urgent, so Q1 is empty.
    assert_eq!(controller.week_stats().total_tracked, 0);
}

#[test]
fn clear_week_data_only_touches_the_given_week() {
    let mut controller = controller();
    let category = controller
        .add_category(new_category("Deep Work"))
        .expect("should add category");

    controller
        .upsert_time_entry(entry_for(&category, date(2026, 1, 5), 9))
        .expect("should track entry");
    controller
        .upsert_planned_entry(entry_for(&category, date(2026, 1, 9), 9))
        .expect("should plan entry");
    controller
        .upsert_time_entry(entry_for(&category, date(2026, 1, 12), 9))
        .expect("should track next week entry");

    controller
        .clear_week_data(date(2026, 1, 5))
        .expect("should clear week");

    let state = controller.state();
    assert_eq!(state.time_entries.len(), 1);
    assert_eq!(state.time_entries[0].date, date(2026, 1, 12));
    assert!(state.planned_entries.is_empty());
}

#[test]
fn clear_cell_data_empties_one_slot() {
    let mut controller = controller();
    let category = controller
        .add_category(new_category("Deep Work"))
        .expect("should add category");

    let monday = date(2026, 1, 5);
    controller
        .upsert_time_entry(entry_for(&category, monday, 9))
        .expect("should track entry");
    controller
        .upsert_planned_entry(entry_for(&category, monday, 9))
        .expect("should plan entry");
    controller
        .upsert_time_entry(entry_for(&category, monday, 10))
        .expect("should track entry");

    controller
        .clear_cell_data(monday, hour(9))
        .expect("should clear cell");

    let state = controller.state();
    assert_eq!(state.time_entries.len(), 1);
    assert_eq!(u8::from(state.time_entries[0].hour), 10);
    assert!(state.planned_entries.is_empty());
}

#[test]
fn reset_categories_restores_seeds_and_drops_orphans() {
    let mut controller = controller();
    let custom = controller
        .add_category(new_category("Deep Work"))
        .expect("should add category");
    let seeded = controller.state().categories[0].clone();
    controller
        .upsert_time_entry(entry_for(&custom, date(2026, 1, 5), 9))
        .expect("should track custom entry");
    controller
        .upsert_time_entry(entry_for(&seeded, date(2026, 1, 5), 10))
        .expect("should track seeded entry");

    let categories = controller
        .reset_categories()
        .expect("should reset categories");
    assert_eq!(categories.len(), 8);

    let state = controller.state();
    assert_eq!(state.categories.len(), 8);
    assert_eq!(state.time_entries.len(), 1);
    assert_eq!(state.time_entries[0].category_id, seeded.id);
}

#[test]
fn settings_update_round_trips_through_state() {
    let mut controller = controller();
    let settings = Settings {
        theme: Theme::Dark,
        ..Settings::default()
    };

    let saved = controller
        .update_settings(settings)
        .expect("should update settings");
    assert_eq!(saved.theme, Theme::Dark);
    assert_eq!(controller.state().settings.theme, Theme::Dark);
}

#[test]
fn clear_all_data_resets_state_to_defaults() {
    let mut controller = controller();
    let category = controller
        .add_category(new_category("Deep Work"))
        .expect("should add category");
    controller
        .upsert_time_entry(entry_for(&category, date(2026, 1, 5), 9))
        .expect("should track entry");

    controller.clear_all_data().expect("should clear data");

    let state = controller.state();
    assert_eq!(state.categories.len(), 8);
    assert!(state.time_entries.is_empty());
    assert!(state.planned_entries.is_empty());
}
