//! Manual time entry management.
//!
//! Entries created here go through the same duration calculation as timer
//! conversions: `HH:MM` start/end anchored to a date, single-day rollover
//! when the end time is earlier than the start, and billing rounding
//! applied according to configuration. Editing an existing entry suppresses
//! re-rounding unless explicitly requested with `--round`.

use crate::db::{clients::Clients, entries::TimeEntries};
use crate::libs::billing::{billable_minutes, is_valid_time_of_day, TimeSpan};
use crate::libs::config::Config;
use crate::libs::entry::{EntryFilter, NewTimeEntry};
use crate::libs::formatter::format_duration;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct EntryArgs {
    #[command(subcommand)]
    command: EntryCommands,
}

#[derive(Debug, Subcommand)]
enum EntryCommands {
    #[command(about = "Add a time entry from wall-clock times")]
    Add {
        #[arg(long, help = "Client ID")]
        client: i64,
        #[arg(long, help = "Product ID")]
        product: Option<i64>,
        #[arg(long, help = "What the time was spent on")]
        description: Option<String>,
        #[arg(long, help = "Start time (HH:MM)")]
        start: String,
        #[arg(long, help = "End time (HH:MM)")]
        end: String,
        #[arg(long, default_value = "today", help = "Entry date (YYYY-MM-DD or 'today')")]
        date: String,
        #[arg(long, help = "Skip billing rounding for this entry")]
        no_round: bool,
    },
    #[command(about = "List time entries for a date")]
    List {
        #[arg(long, short, default_value = "today", help = "Date to list (YYYY-MM-DD or 'today')")]
        date: String,
    },
    #[command(about = "Edit a time entry")]
    Edit {
        id: i64,
        #[arg(long, help = "New start time (HH:MM)")]
        start: Option<String>,
        #[arg(long, help = "New end time (HH:MM)")]
        end: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Re-apply billing rounding to the edited span")]
        round: bool,
    },
    #[command(about = "Delete a time entry")]
    Delete { id: i64 },
}

pub async fn cmd(args: EntryArgs) -> Result<()> {
    match args.command {
        EntryCommands::Add {
            client,
            product,
            description,
            start,
            end,
            date,
            no_round,
        } => add(client, product, description, &start, &end, &date, no_round).await,
        EntryCommands::List { date } => list(&date).await,
        EntryCommands::Edit {
            id,
            start,
            end,
            description,
            round,
        } => edit(id, start, end, description, round).await,
        EntryCommands::Delete { id } => delete(id).await,
    }
}

async fn add(
    client: i64,
    product: Option<i64>,
    description: Option<String>,
    start: &str,
    end: &str,
    date: &str,
    no_round: bool,
) -> Result<()> {
    let config = Config::read()?;
    let user = match config.user {
        Some(user) => user.name,
        None => msg_bail_anyhow!(Message::UserNotConfigured),
    };

    // The calculator itself degrades malformed input to zero; interactive
    // input gets validated here instead.
    if !is_valid_time_of_day(start) {
        msg_bail_anyhow!(Message::InvalidTimeOfDay(start.to_string()));
    }
    if !is_valid_time_of_day(end) {
        msg_bail_anyhow!(Message::InvalidTimeOfDay(end.to_string()));
    }
    if Clients::new()?.fetch(client)?.is_none() {
        msg_bail_anyhow!(Message::ClientNotFound(client));
    }

    let billing = config.billing.unwrap_or_default();
    let reference_date = parse_date(date)?;

    let mut span = TimeSpan::compute(start, end, reference_date);
    if billing.enforce_minimum {
        span = span.with_minimum();
    }
    if span.exceeds_sanity_threshold() {
        msg_warning!(Message::SpanSanityWarning(format_duration(&(span.end - span.start))));
    }

    let actual_minutes = span.actual_minutes();
    let billed_minutes = billable_minutes(actual_minutes, billing.rounding_enabled && !no_round);

    let id = TimeEntries::new()?.insert(&NewTimeEntry {
        user,
        client_id: client,
        product_id: product,
        description,
        start: span.start,
        end: span.end,
        actual_minutes,
        billed_minutes,
    })?;
    msg_success!(Message::EntryCreated(id));

    Ok(())
}

async fn list(date: &str) -> Result<()> {
    let date = parse_date(date)?;
    let rows = TimeEntries::new()?.fetch_rows(EntryFilter::Day(date))?;
    if rows.is_empty() {
        msg_info!(Message::EntriesNotFound(date.format("%B %-d, %Y").to_string()));
        return Ok(());
    }

    msg_print!(Message::ReportTitle(date.format("%B %-d, %Y").to_string()), true);
    View::entries(&rows)?;

    Ok(())
}

async fn edit(id: i64, start: Option<String>, end: Option<String>, description: Option<String>, round: bool) -> Result<()> {
    let mut entries = TimeEntries::new()?;
    let mut entry = match entries.fetch(id)? {
        Some(entry) => entry,
        None => {
            msg_error!(Message::EntryNotFound(id));
            return Ok(());
        }
    };

    if start.is_some() || end.is_some() {
        let start_str = start.unwrap_or_else(|| entry.start.format("%H:%M").to_string());
        let end_str = end.unwrap_or_else(|| entry.end.format("%H:%M").to_string());
        if !is_valid_time_of_day(&start_str) {
            msg_bail_anyhow!(Message::InvalidTimeOfDay(start_str));
        }
        if !is_valid_time_of_day(&end_str) {
            msg_bail_anyhow!(Message::InvalidTimeOfDay(end_str));
        }

        let span = TimeSpan::compute(&start_str, &end_str, entry.start.date());
        if span.exceeds_sanity_threshold() {
            msg_warning!(Message::SpanSanityWarning(format_duration(&(span.end - span.start))));
        }

        entry.start = span.start;
        entry.end = span.end;
        entry.actual_minutes = span.actual_minutes();
        // Already-billed entries keep their value unless --round re-rounds.
        entry.billed_minutes = billable_minutes(entry.actual_minutes, round);
    }

    if let Some(description) = description {
        entry.description = Some(description);
    }

    entries.update(id, &entry)?;
    msg_success!(Message::EntryUpdated(id));

    Ok(())
}

async fn delete(id: i64) -> Result<()> {
    let mut entries = TimeEntries::new()?;
    if entries.fetch(id)?.is_none() {
        msg_error!(Message::EntryNotFound(id));
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteEntry(id).to_string())
        .default(false)
        .interact()?;
    if confirmed {
        entries.delete(id)?;
        msg_success!(Message::EntryDeleted(id));
    }

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
