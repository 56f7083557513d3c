//! # Tidvis - Time Tracking and Invoice Basis
//!
//! A command-line utility for tracking billable time per client, managing
//! the client and product registers, and exporting invoice-basis data.
//!
//! ## Features
//!
//! - **Timer**: Start, pause, resume and stop a persisted work timer
//! - **Billing Durations**: Actual and 15-minute rounded durations per entry
//! - **Registers**: Create, update and delete clients and products
//! - **Time Entries**: Manual entry from wall-clock times or timer conversion
//! - **Reports**: Daily and monthly tables of billable time
//! - **Data Export**: Export invoice basis to CSV, JSON, and Excel formats
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tidvis::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
