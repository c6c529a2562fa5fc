//! CSV export of a week of tracked entries.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::long_day_name;
use crate::domain::category::Category;
use crate::domain::entry::Entry;

/// Rendered file ready to hand to the user.
#[derive(Debug, Clone)]
pub struct DownloadFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render csv")]
    CsvRender,
}

const HEADERS: [&str; 8] = [
    "Date",
    "Day",
    "Time",
    "Category",
    "Important",
    "Urgent",
    "Quadrant",
    "Description",
];

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Renders the week beginning at `week_start` as a CSV download.
///
/// Rows are ordered by date then hour; entries whose category no longer
/// exists are labeled `Unknown`.
pub fn export_week_csv(
    week_start: NaiveDate,
    entries: &[Entry],
    categories: &[Category],
) -> Result<DownloadFile, ExportError> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.slot());

    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(HEADERS)
        .map_err(|_| ExportError::CsvRender)?;

    for entry in sorted {
        let category = categories
            .iter()
            .find(|c| c.id == entry.category_id)
            .map_or("Unknown", |c| c.name.as_str());
        let row = [
            entry.date.to_string(),
            long_day_name(entry.date),
            entry.hour.format_12h(),
            category.to_string(),
            yes_no(entry.is_important).to_string(),
            yes_no(entry.is_urgent).to_string(),
            entry.quadrant().label().to_string(),
            entry
                .description
                .as_ref()
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
        ];
        let escaped: Vec<String> = row.iter().map(|value| escape_csv_cell(value)).collect();
        writer
            .write_record(&escaped)
            .map_err(|_| ExportError::CsvRender)?;
    }

    let bytes = writer.into_inner().map_err(|_| ExportError::CsvRender)?;
    Ok(DownloadFile {
        file_name: format!("time-tracking-{week_start}.csv"),
        content_type: "text/csv; charset=utf-8",
        bytes,
    })
}

fn escape_csv_cell(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some('=' | '+' | '-' | '@') => format!("'{value}"),
        _ => value.to_string(),
    }
}
