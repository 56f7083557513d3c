use super::db::Db;
use crate::libs::entry::{EntryFilter, EntryRow, NewTimeEntry, TimeEntry};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INSERT_ENTRY: &str = "INSERT INTO time_entries (user, client_id, product_id, description, start, end, actual_minutes, billed_minutes, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime(CURRENT_TIMESTAMP, 'localtime'))";
const SELECT_FIELDS: &str = "SELECT id, user, client_id, product_id, description, start, end, actual_minutes, billed_minutes FROM time_entries";
const SELECT_ROWS: &str = "SELECT e.id, e.user, e.client_id, e.product_id, e.description, e.start, e.end, e.actual_minutes, e.billed_minutes, c.name, p.name
    FROM time_entries e
    JOIN clients c ON c.id = e.client_id
    LEFT JOIN products p ON p.id = e.product_id";
const WHERE_DAY: &str = "WHERE DATE(e.start) = DATE(?1) ORDER BY e.start";
const WHERE_MONTH: &str = "WHERE strftime('%Y-%m', e.start) = strftime('%Y-%m', ?1) ORDER BY e.start";
const WHERE_ID: &str = "WHERE id = ?1";
const UPDATE_ENTRY: &str =
    "UPDATE time_entries SET start = ?2, end = ?3, actual_minutes = ?4, billed_minutes = ?5, description = ?6 WHERE id = ?1";
const DELETE_ENTRY: &str = "DELETE FROM time_entries WHERE id = ?1";

fn map_entry(row: &Row<'_>) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get(0)?,
        user: row.get(1)?,
        client_id: row.get(2)?,
        product_id: row.get(3)?,
        description: row.get(4)?,
        start: NaiveDateTime::parse_from_str(&row.get::<_, String>(5)?, TIMESTAMP_FORMAT).unwrap(),
        end: NaiveDateTime::parse_from_str(&row.get::<_, String>(6)?, TIMESTAMP_FORMAT).unwrap(),
        actual_minutes: row.get(7)?,
        billed_minutes: row.get(8)?,
    })
}

pub struct TimeEntries {
    pub conn: Connection,
}

impl TimeEntries {
    pub fn new() -> Result<TimeEntries> {
        let db = Db::new()?;
        Ok(TimeEntries { conn: db.conn })
    }

    pub fn insert(&mut self, entry: &NewTimeEntry) -> Result<i64> {
        self.conn.execute(
            INSERT_ENTRY,
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
        Ok(self.conn.last_insert_rowid())
    }

    pub fn fetch(&mut self, id: i64) -> Result<Option<TimeEntry>> {
        let entry = self
            .conn
            .query_row(&format!("{} {}", SELECT_FIELDS, WHERE_ID), params![id], map_entry)
            .optional()?;
        Ok(entry)
    }

    /// Entries joined with client and product names for display and export.
    pub fn fetch_rows(&mut self, filter: EntryFilter) -> Result<Vec<EntryRow>> {
        let (sql, date) = match filter {
            EntryFilter::Day(date) => (format!("{} {}", SELECT_ROWS, WHERE_DAY), date),
            EntryFilter::Month(date) => (format!("{} {}", SELECT_ROWS, WHERE_MONTH), date),
        };
        let date_str = date.format("%Y-%m-%d").to_string();

        let mut stmt = self.conn.prepare(&sql)?;
        let row_iter = stmt.query_map([&date_str], |row| {
            Ok(EntryRow {
                entry: map_entry(row)?,
                client_name: row.get(9)?,
                product_name: row.get(10)?,
            })
        })?;
        let mut rows = Vec::new();
        for row in row_iter {
            rows.push(row?);
        }
        Ok(rows)
    }

    pub fn update(&mut self, id: i64, entry: &TimeEntry) -> Result<()> {
        self.conn.execute(
            UPDATE_ENTRY,
            params![
                id,
                entry.start.format(TIMESTAMP_FORMAT).to_string(),
                entry.end.format(TIMESTAMP_FORMAT).to_string(),
                entry.actual_minutes,
                entry.billed_minutes,
                entry.description
            ],
        )?;
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.conn.execute(DELETE_ENTRY, params![id])?;
        Ok(())
    }
}
