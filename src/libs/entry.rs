//! Time entry domain types.
//!
//! A time entry is the finalized, billable record of work: client, optional
//! product, description, the wall-clock span, and both the actual and billed
//! durations. Entries come from manual `HH:MM` input or from converting a
//! stopped timer.

use crate::db::timers::TimerRecord;
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone)]
pub struct TimeEntry {
    pub id: i64,
    pub user: String,
    pub client_id: i64,
    pub product_id: Option<i64>,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub actual_minutes: i64,
    pub billed_minutes: i64,
}

/// Fields for a time entry that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub user: String,
    pub client_id: i64,
    pub product_id: Option<i64>,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub actual_minutes: i64,
    pub billed_minutes: i64,
}

impl NewTimeEntry {
    /// Builds an entry from a completed timer and the caller-chosen billed
    /// duration (actual or rounded, decided at the confirmation step).
    pub fn from_timer(record: &TimerRecord, actual_minutes: i64, billed_minutes: i64) -> Self {
        let end = record
            .end
            .unwrap_or(record.start + Duration::minutes(actual_minutes));
        NewTimeEntry {
            user: record.user.clone(),
            client_id: record.client_id,
            product_id: record.product_id,
            description: record.description.clone(),
            start: record.start,
            end,
            actual_minutes,
            billed_minutes,
        }
    }
}

/// A time entry joined with the client and product names for display.
#[derive(Debug, Clone)]
pub struct EntryRow {
    pub entry: TimeEntry,
    pub client_name: String,
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum EntryFilter {
    Day(chrono::NaiveDate),
    Month(chrono::NaiveDate),
}
