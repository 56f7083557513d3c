//! Persistence for the active work timer.
//!
//! One row per timer instance. At most one non-completed timer exists per
//! user; the service layer enforces this by abandoning any previous active
//! timer on start. Converting a completed timer into a time entry performs
//! the entry insert and the timer delete in a single transaction so a
//! failure between the two writes cannot leave both records behind.
//!
//! The connection is wrapped in `Arc<Mutex<>>` because the store is read
//! concurrently from the live watch display while commands mutate it.

use super::db::Db;
use crate::libs::entry::NewTimeEntry;
use crate::libs::timer::TimerStatus;
use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INSERT_TIMER: &str = "INSERT INTO timers (user, client_id, product_id, description, status, start, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime(CURRENT_TIMESTAMP, 'localtime'), datetime(CURRENT_TIMESTAMP, 'localtime'))";
const SELECT_FIELDS: &str = "SELECT id, user, client_id, product_id, description, status, start, end FROM timers";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_ACTIVE: &str = "WHERE user = ?1 AND status IN ('running', 'paused') ORDER BY id DESC LIMIT 1";
const UPDATE_PAUSED: &str =
    "UPDATE timers SET status = 'paused', end = ?2, updated_at = datetime(CURRENT_TIMESTAMP, 'localtime') WHERE id = ?1";
const UPDATE_RUNNING: &str =
    "UPDATE timers SET status = 'running', start = ?2, end = NULL, updated_at = datetime(CURRENT_TIMESTAMP, 'localtime') WHERE id = ?1";
const UPDATE_COMPLETED: &str =
    "UPDATE timers SET status = 'completed', end = ?2, updated_at = datetime(CURRENT_TIMESTAMP, 'localtime') WHERE id = ?1";
const DELETE_TIMER: &str = "DELETE FROM timers WHERE id = ?1";
const INSERT_ENTRY_FROM_TIMER: &str = "INSERT INTO time_entries (user, client_id, product_id, description, start, end, actual_minutes, billed_minutes, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime(CURRENT_TIMESTAMP, 'localtime'))";

/// A persisted timer row.
///
/// `start` is the actual start instant only while the timer has never been
/// paused; after a resume it is a synthetic value chosen so that
/// `now - start` equals the accumulated running time.
#[derive(Debug, Clone)]
pub struct TimerRecord {
    pub id: i64,
    pub user: String,
    pub client_id: i64,
    pub product_id: Option<i64>,
    pub description: Option<String>,
    pub status: TimerStatus,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

/// Fields for a timer that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewTimer {
    pub user: String,
    pub client_id: i64,
    pub product_id: Option<i64>,
    pub description: Option<String>,
    pub start: NaiveDateTime,
}

fn map_timer(row: &Row<'_>) -> rusqlite::Result<TimerRecord> {
    Ok(TimerRecord {
        id: row.get(0)?,
        user: row.get(1)?,
        client_id: row.get(2)?,
        product_id: row.get(3)?,
        description: row.get(4)?,
        status: TimerStatus::from_str(&row.get::<_, String>(5)?).unwrap(),
        start: NaiveDateTime::parse_from_str(&row.get::<_, String>(6)?, TIMESTAMP_FORMAT).unwrap(),
        end: row
            .get::<_, Option<String>>(7)?
            .map(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).unwrap()),
    })
}

pub struct Timers {
    pub conn: Arc<Mutex<Connection>>,
}

impl Timers {
    pub fn new() -> Result<Timers> {
        let db = Db::new()?;
        Ok(Timers {
            conn: Arc::new(Mutex::new(db.conn)),
        })
    }

    pub fn create(&self, timer: &NewTimer) -> Result<TimerRecord> {
        let start_str = timer.start.format(TIMESTAMP_FORMAT).to_string();
        let id = {
            let conn_guard = self.conn.lock();
            conn_guard.execute(
                INSERT_TIMER,
                params![
                    timer.user,
                    timer.client_id,
                    timer.product_id,
                    timer.description,
                    TimerStatus::Running.as_str(),
                    start_str
                ],
            )?;
            conn_guard.last_insert_rowid()
        };
        self.fetch(id)?.ok_or_else(|| anyhow!("timer {} missing after insert", id))
    }

    pub fn fetch(&self, id: i64) -> Result<Option<TimerRecord>> {
        let conn_guard = self.conn.lock();
        let timer = conn_guard
            .query_row(&format!("{} {}", SELECT_FIELDS, WHERE_ID), params![id], map_timer)
            .optional()?;
        Ok(timer)
    }

    /// The user's single running or paused timer, if any.
    pub fn get_active(&self, user: &str) -> Result<Option<TimerRecord>> {
        let conn_guard = self.conn.lock();
        let timer = conn_guard
            .query_row(&format!("{} {}", SELECT_FIELDS, WHERE_ACTIVE), params![user], map_timer)
            .optional()?;
        Ok(timer)
    }

    pub fn mark_paused(&self, id: i64, end: NaiveDateTime) -> Result<TimerRecord> {
        let end_str = end.format(TIMESTAMP_FORMAT).to_string();
        self.conn.lock().execute(UPDATE_PAUSED, params![id, end_str])?;
        self.fetch(id)?.ok_or_else(|| anyhow!("timer {} missing after update", id))
    }

    /// Rewrites the start instant and reopens the timer. Used by resume with
    /// a synthetic start that preserves accumulated elapsed time.
    pub fn mark_running(&self, id: i64, start: NaiveDateTime) -> Result<TimerRecord> {
        let start_str = start.format(TIMESTAMP_FORMAT).to_string();
        self.conn.lock().execute(UPDATE_RUNNING, params![id, start_str])?;
        self.fetch(id)?.ok_or_else(|| anyhow!("timer {} missing after update", id))
    }

    pub fn mark_completed(&self, id: i64, end: NaiveDateTime) -> Result<TimerRecord> {
        let end_str = end.format(TIMESTAMP_FORMAT).to_string();
        self.conn.lock().execute(UPDATE_COMPLETED, params![id, end_str])?;
        self.fetch(id)?.ok_or_else(|| anyhow!("timer {} missing after update", id))
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.conn.lock().execute(DELETE_TIMER, params![id])?;
        Ok(())
    }

    /// Creates the time entry and deletes the timer in one transaction.
    /// Returns the new entry's id.
    pub fn convert_to_entry(&self, timer_id: i64, entry: &NewTimeEntry) -> Result<i64> {
        let mut conn_guard = self.conn.lock();
        let tx = conn_guard.transaction()?;
        tx.execute(
            INSERT_ENTRY_FROM_TIMER,
            params![
                entry.user,
                entry.client_id,
                entry.product_id,
                entry.description,
                entry.start.format(TIMESTAMP_FORMAT).to_string(),
                entry.end.format(TIMESTAMP_FORMAT).to_string(),
                entry.actual_minutes,
                entry.billed_minutes
            ],
        )?;
        let entry_id = tx.last_insert_rowid();
        tx.execute(DELETE_TIMER, params![timer_id])?;
        tx.commit()?;
        Ok(entry_id)
    }
}
