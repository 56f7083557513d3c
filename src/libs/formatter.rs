//! Duration formatting for reports, tables, and timer display.

use chrono::Duration;

/// Formats a duration as "HH:MM", clamping negatives to zero.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats a duration as "HH:MM:SS" for the live timer display.
pub fn format_elapsed(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    let secs = duration.num_seconds() % 60;

    format!("{:02}:{:02}:{:02}", hours.max(0), mins.max(0), secs.max(0))
}

/// Formats a whole-minute count as "HH:MM".
pub fn format_minutes(minutes: i64) -> String {
    format_duration(&Duration::minutes(minutes))
}
