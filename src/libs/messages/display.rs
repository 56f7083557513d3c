//! Display implementation for tidvis application messages.
//!
//! Converts structured `Message` variants into the human-readable text shown
//! on the terminal. All user-facing wording lives here, in one place, so the
//! rest of the application deals only in typed message values.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::ConfigModuleUser => "User identity configuration".to_string(),
            Message::ConfigModuleBilling => "Billing rules configuration".to_string(),
            Message::ConfigModuleExport => "Export configuration".to_string(),
            Message::PromptUserName => "Your name (timer owner)".to_string(),
            Message::PromptRoundingEnabled => "Round new entries to 15-minute blocks?".to_string(),
            Message::PromptEnforceMinimum => "Extend entries shorter than 15 minutes to the minimum?".to_string(),
            Message::PromptExportDir => "Default export directory".to_string(),
            Message::UserNotConfigured => "No user configured. Run 'tidvis init' and set up the user module first".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migration(s)", count),
            Message::RunningMigration(version, name) => format!("Applying migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} applied", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "Database schema is up to date".to_string(),

            // === CLIENT MESSAGES ===
            Message::ClientCreated(name) => format!("Client '{}' created", name),
            Message::ClientRenamed(name) => format!("Client renamed to '{}'", name),
            Message::ClientDeleted(name) => format!("Client '{}' deleted", name),
            Message::ClientNotFound(id) => format!("Client with ID {} not found", id),
            Message::ClientHasEntries(name) => format!("Client '{}' has recorded time entries and cannot be deleted", name),
            Message::ClientsNotFound => "No clients registered yet".to_string(),
            Message::ClientsTitle => "Clients".to_string(),
            Message::ConfirmDeleteClient(name) => format!("Delete client '{}'?", name),

            // === PRODUCT MESSAGES ===
            Message::ProductCreated(name) => format!("Product '{}' created", name),
            Message::ProductUpdated(name) => format!("Product '{}' updated", name),
            Message::ProductDeleted(name) => format!("Product '{}' deleted", name),
            Message::ProductNotFound(id) => format!("Product with ID {} not found", id),
            Message::ProductsNotFound => "No products registered yet".to_string(),
            Message::ProductsTitle => "Products".to_string(),
            Message::ConfirmDeleteProduct(name) => format!("Delete product '{}'?", name),

            // === TIME ENTRY MESSAGES ===
            Message::EntryCreated(id) => format!("Time entry {} created", id),
            Message::EntryUpdated(id) => format!("Time entry {} updated", id),
            Message::EntryDeleted(id) => format!("Time entry {} deleted", id),
            Message::EntryNotFound(id) => format!("Time entry {} not found", id),
            Message::EntriesNotFound(date) => format!("No time entries for {}", date),
            Message::InvalidTimeOfDay(value) => format!("'{}' is not a valid time, expected HH:MM", value),
            Message::SpanSanityWarning(duration) => format!("Span of {} exceeds 16 hours; check the start and end times", duration),
            Message::ConfirmDeleteEntry(id) => format!("Delete time entry {}?", id),

            // === TIMER MESSAGES ===
            Message::TimerStarted(start) => format!("Timer started at {}", start),
            Message::TimerPaused(elapsed) => format!("Timer paused at {} elapsed", elapsed),
            Message::TimerResumed(elapsed) => format!("Timer resumed with {} already on the clock", elapsed),
            Message::TimerStopped(actual, rounded) => format!("Timer stopped: {} actual, {} rounded", actual, rounded),
            Message::TimerAbandoned(start) => format!("Abandoned previous timer started at {} (no entry created)", start),
            Message::TimerConverted(id) => format!("Timer saved as time entry {}", id),
            Message::TimerDiscarded => "Timer discarded".to_string(),
            Message::NoActiveTimer => "No active timer".to_string(),
            Message::TimerNotRunning => "Timer is not running".to_string(),
            Message::TimerNotPaused => "Timer is not paused".to_string(),
            Message::PromptSaveEntry => "Save as time entry?".to_string(),
            Message::PromptBilledDuration => "Billed duration".to_string(),
            Message::WatchHint => "Watching timer, press Ctrl+C to stop".to_string(),

            // === REPORT MESSAGES ===
            Message::ReportTitle(date) => format!("Time entries for {}", date),
            Message::MonthTitle(month) => format!("Billable time for {}", month),
            Message::NoEntriesForMonth(month) => format!("No time entries recorded in {}", month),

            // === EXPORT MESSAGES ===
            Message::ExportingData(format, month) => format!("Exporting invoice basis for {} as {}", month, format),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
        };

        write!(f, "{}", text)
    }
}
