//! CSV export of pickup records.
//!
//! The column order is a fixed contract consumed by downstream
//! spreadsheets: `id,address,scheduled_date,timeslot,crew_email,status,
//! created_at,completed_at`. The address field is always quoted (it
//! routinely contains commas); the other columns never are.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::pickups::PickupWithCrew;

/// CSV header row for pickup exports.
const CSV_HEADER: &str = "id,address,scheduled_date,timeslot,crew_email,status,created_at,completed_at";

/// Render pickups as a CSV document.
#[must_use]
pub fn pickups_to_csv(pickups: &[PickupWithCrew]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for entry in pickups {
        let pickup = &entry.pickup;
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            pickup.id,
            quote(&pickup.address),
            pickup.scheduled_date,
            pickup.timeslot,
            entry.crew_email.as_ref().map_or("", |e| e.as_str()),
            pickup.status,
            timestamp(Some(pickup.created_at)),
            timestamp(pickup.completed_at),
        ));
    }

    out
}

/// Quote a field, doubling embedded quotes per RFC 4180.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render an optional timestamp as RFC 3339 UTC, empty when absent.
fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(String::new, |t| {
        t.to_rfc3339_opts(SecondsFormat::Millis, true)
    })
}
