//! Database schema migration management.
//!
//! Versioned, forward-only migrations applied at connection time. Applied
//! versions are recorded in a `migrations` table; each run applies only the
//! pending ones, inside a transaction, so a failure leaves the schema at the
//! previous version.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracking table recording every applied migration.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema migration: version, name, and the transformation.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: registers, time entries, timers, and their indices
        self.add_migration(1, "create_registers_entries_and_timers", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS clients (
        id INTEGER NOT NULL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS products (
        id INTEGER NOT NULL PRIMARY KEY,
        name TEXT NOT NULL,
        unit TEXT NOT NULL DEFAULT 'hour',
        rate REAL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS time_entries (
        id INTEGER NOT NULL PRIMARY KEY,
        user TEXT NOT NULL,
        client_id INTEGER NOT NULL,
        product_id INTEGER,
        description TEXT,
        start TIMESTAMP NOT NULL,
        end TIMESTAMP NOT NULL,
        actual_minutes INTEGER NOT NULL,
        billed_minutes INTEGER NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (client_id) REFERENCES clients(id),
        FOREIGN KEY (product_id) REFERENCES products(id)
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS timers (
        id INTEGER NOT NULL PRIMARY KEY,
        user TEXT NOT NULL,
        client_id INTEGER NOT NULL,
        product_id INTEGER,
        description TEXT,
        status TEXT NOT NULL,
        start TIMESTAMP NOT NULL,
        end TIMESTAMP,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (client_id) REFERENCES clients(id)
    )",
                [],
            )?;

            // Index entries by start time for daily/monthly reporting
            tx.execute("CREATE INDEX IF NOT EXISTS idx_entries_start ON time_entries(start)", [])?;
            // Index entries by client for register integrity checks and grouping
            tx.execute("CREATE INDEX IF NOT EXISTS idx_entries_client ON time_entries(client_id)", [])?;
            // Index timers by owner and status for the active-timer lookup
            tx.execute("CREATE INDEX IF NOT EXISTS idx_timers_user_status ON timers(user, status)", [])?;

            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies all pending migrations within a single transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(format!("{}", Message::MigrationsFound(pending.len())));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(format!("{}", Message::RunningMigration(migration.version, migration.name.to_string())));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(format!("{}", Message::AllMigrationsCompleted));

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience entry point used by `Db::new`.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Current schema version, 0 when no migration has been applied.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
        .unwrap_or(Some(0));
    Ok(version.unwrap_or(0))
}
