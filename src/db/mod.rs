//! Database layer for the tidvis application.
//!
//! SQLite-backed persistence for the client and product registers, finalized
//! time entries, and the active work timer. Schema evolution goes through
//! the versioned migration system applied at connection time.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tidvis::db::clients::Clients;
//! use tidvis::libs::client::Client;
//!
//! let mut clients = Clients::new()?;
//! let id = clients.insert(&Client::new("Acme AB", None, None))?;
//! # anyhow::Ok(())
//! ```

/// Core database connection and initialization.
pub mod db;

/// Versioned schema migration system.
pub mod migrations;

/// Client register operations.
pub mod clients;

/// Product register operations.
pub mod products;

/// Finalized, billable time entry operations.
pub mod entries;

/// Active work timer persistence.
pub mod timers;
