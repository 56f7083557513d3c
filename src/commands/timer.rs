//! Work timer command.
//!
//! Drives the timer state machine: start/pause/resume/stop plus a status
//! view and a live watch mode. Stopping runs the confirmation step where the
//! elapsed time is either saved as a time entry (with the billed duration
//! chosen between rounded and actual) or discarded.

use crate::db::{clients::Clients, timers::Timers};
use crate::libs::billing::SPAN_SANITY_HOURS;
use crate::libs::config::Config;
use crate::libs::formatter::{format_elapsed, format_minutes};
use crate::libs::messages::Message;
use crate::libs::notifier::ConsoleNotifier;
use crate::libs::ticker::{Ticker, VisibilityGate};
use crate::libs::timer::{StoppedTimer, TimerError, TimerService, TimerStatus};
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use std::io::Write;

#[derive(Debug, Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    command: TimerCommands,
}

#[derive(Debug, Subcommand)]
enum TimerCommands {
    #[command(about = "Start a timer, abandoning any active one")]
    Start {
        #[arg(long, help = "Client ID")]
        client: i64,
        #[arg(long, help = "Product ID")]
        product: Option<i64>,
        #[arg(long, help = "What the time is being spent on")]
        description: Option<String>,
    },
    #[command(about = "Pause the running timer")]
    Pause,
    #[command(about = "Resume the paused timer")]
    Resume,
    #[command(about = "Stop the timer and confirm the entry")]
    Stop,
    #[command(about = "Show the active timer")]
    Status,
    #[command(about = "Watch the running timer tick")]
    Watch,
}

pub async fn cmd(args: TimerArgs) -> Result<()> {
    match args.command {
        TimerCommands::Start {
            client,
            product,
            description,
        } => {
            if Clients::new()?.fetch(client)?.is_none() {
                msg_bail_anyhow!(Message::ClientNotFound(client));
            }
            let mut service = service()?;
            match service.start(client, product, description) {
                Ok(record) => msg_success!(Message::TimerStarted(record.start.format("%H:%M").to_string())),
                Err(e) => report(e)?,
            }
        }
        TimerCommands::Pause => {
            let mut service = service()?;
            match service.pause() {
                Ok(record) => msg_success!(Message::TimerPaused(TimerService::format_elapsed_of(&record))),
                Err(e) => report(e)?,
            }
        }
        TimerCommands::Resume => {
            let mut service = service()?;
            match service.resume() {
                Ok(record) => msg_success!(Message::TimerResumed(TimerService::format_elapsed_of(&record))),
                Err(e) => report(e)?,
            }
        }
        TimerCommands::Stop => {
            let mut service = service()?;
            match service.stop() {
                Ok(stopped) => confirm(&mut service, stopped)?,
                Err(e) => report(e)?,
            }
        }
        TimerCommands::Status => status()?,
        TimerCommands::Watch => watch().await?,
    }

    Ok(())
}

fn service() -> Result<TimerService> {
    let config = Config::read()?;
    let user = match config.user {
        Some(user) => user.name,
        None => msg_bail_anyhow!(Message::UserNotConfigured),
    };
    Ok(TimerService::new(user, Timers::new()?, Box::new(ConsoleNotifier)))
}

/// Precondition violations become notifications; store failures propagate.
fn report(error: TimerError) -> Result<()> {
    match error {
        TimerError::NoActiveTimer => {
            msg_error!(Message::NoActiveTimer);
            Ok(())
        }
        TimerError::NotRunning => {
            msg_error!(Message::TimerNotRunning);
            Ok(())
        }
        TimerError::NotPaused => {
            msg_error!(Message::TimerNotPaused);
            Ok(())
        }
        TimerError::Store(e) => Err(e),
    }
}

/// The save-or-discard confirmation step after a stop.
fn confirm(service: &mut TimerService, stopped: StoppedTimer) -> Result<()> {
    msg_print!(
        Message::TimerStopped(format_minutes(stopped.actual_minutes), format_minutes(stopped.rounded_minutes)),
        true
    );
    if stopped.actual_minutes > SPAN_SANITY_HOURS * 60 {
        msg_warning!(Message::SpanSanityWarning(format_minutes(stopped.actual_minutes)));
    }

    let save = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSaveEntry.to_string())
        .default(true)
        .interact()?;
    if !save {
        service.discard(stopped.record.id)?;
        msg_info!(Message::TimerDiscarded);
        return Ok(());
    }

    let choices = vec![
        format!("Rounded ({})", format_minutes(stopped.rounded_minutes)),
        format!("Actual ({})", format_minutes(stopped.actual_minutes)),
    ];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptBilledDuration.to_string())
        .items(&choices)
        .default(0)
        .interact()?;
    let billed_minutes = if selection == 0 {
        stopped.rounded_minutes
    } else {
        stopped.actual_minutes
    };

    service.convert_to_entry(&stopped, billed_minutes)?;

    Ok(())
}

fn status() -> Result<()> {
    let mut service = service()?;
    match service.active()? {
        Some(record) => {
            let client_name = Clients::new()?
                .fetch(record.client_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| record.client_id.to_string());
            let elapsed = TimerService::elapsed_of(&record, Local::now().naive_local());
            View::timer_status(&record, &client_name, &elapsed)?;
        }
        None => msg_info!(Message::NoActiveTimer),
    }

    Ok(())
}

async fn watch() -> Result<()> {
    let mut service = service()?;
    let record = match service.active()? {
        Some(record) => record,
        None => {
            msg_info!(Message::NoActiveTimer);
            return Ok(());
        }
    };

    if record.status != TimerStatus::Running {
        // A paused timer does not tick; its elapsed time is fixed.
        let elapsed = TimerService::elapsed_of(&record, Local::now().naive_local());
        msg_print!(Message::TimerPaused(format_elapsed(&elapsed)));
        return Ok(());
    }

    msg_print!(Message::WatchHint);
    let ticker = Ticker::new(record.start, VisibilityGate::new(true));
    tokio::select! {
        _ = ticker.run(|elapsed| {
            print!("\r⏱  {}", format_elapsed(&elapsed));
            let _ = std::io::stdout().flush();
            true
        }) => {}
        _ = tokio::signal::ctrl_c() => {
            println!();
        }
    }

    Ok(())
}
