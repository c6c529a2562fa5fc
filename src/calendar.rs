//! Clock abstraction and week arithmetic for the tracking grid.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};

use crate::domain::settings::WeekStart;

/// Source of the current time, injected so tests can pin it.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Fixed clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, starts_on: WeekStart) -> NaiveDate {
    let day_index = date.weekday().num_days_from_sunday();
    let days_back = (day_index + 7 - u32::from(starts_on.get())) % 7;
    date - Days::new(u64::from(days_back))
}

/// The seven consecutive days beginning at `start`.
pub fn week_days(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| start + Days::new(i as u64))
}

/// Start of the week after the one beginning at `start`.
pub fn next_week(start: NaiveDate) -> NaiveDate {
    start + Days::new(7)
}

/// Start of the week before the one beginning at `start`.
pub fn previous_week(start: NaiveDate) -> NaiveDate {
    start - Days::new(7)
}

/// Human label for the week beginning at `start`, e.g. `Jan 5 - Jan 11, 2026`.
pub fn format_week_range(start: NaiveDate) -> String {
    let end = start + Days::new(6);
    format!(
        "{} - {}, {}",
        start.format("%b %-d"),
        end.format("%b %-d"),
        end.year()
    )
}

/// Full weekday name, e.g. `Monday`.
pub fn long_day_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Abbreviated weekday name, e.g. `Mon`.
pub fn short_day_name(date: NaiveDate) -> String {
    date.format("%a").to_string()
}
