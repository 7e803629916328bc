//! Calendar grid rendering.
//!
//! Lays the lookahead horizon out as week rows: the first row starts on
//! today and each row breaks after Sunday, so cells drift across columns
//! the way a paper calendar does. A cell carries the day-of-month and
//! weekday, then one block per venue with availability on that date.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tabled::builder::Builder;
use tabled::settings::Style;

use tablewatch_api::AvailabilityReport;

/// Render the report as a calendar covering `days` days from `start`.
pub fn render(report: &AvailabilityReport, start: NaiveDate, days: i64) -> String {
    let dates: Vec<NaiveDate> = (0..days).map(|i| start + Duration::days(i)).collect();

    let mut builder = Builder::default();
    for week in group_weeks(&dates) {
        let mut row: Vec<String> = week
            .iter()
            .map(|date| render_cell(*date, report))
            .collect();
        row.resize(7, String::new());
        builder.push_record(row);
    }

    builder.build().with(Style::modern()).to_string()
}

/// Split consecutive dates into rows of at most seven, breaking after
/// each Sunday.
fn group_weeks(dates: &[NaiveDate]) -> Vec<Vec<NaiveDate>> {
    let mut weeks = Vec::new();
    let mut current: Vec<NaiveDate> = Vec::new();

    for &date in dates {
        if current
            .last()
            .is_some_and(|last| last.weekday() == Weekday::Sun)
        {
            weeks.push(std::mem::take(&mut current));
        }
        current.push(date);
    }
    if !current.is_empty() {
        weeks.push(current);
    }
    weeks
}

fn render_cell(date: NaiveDate, report: &AvailabilityReport) -> String {
    let mut lines = vec![format!("{:>2} {}", date.day(), date.format("%a"))];

    for (venue, availability) in &report.venues {
        if let Some(slots) = availability.slots.get(&date) {
            lines.push(venue.clone());
            for slot in slots {
                lines.push(format!("{} ({})", slot.time, slot.seating_type));
            }
        }
    }

    lines.join("\n")
}
