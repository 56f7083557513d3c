//! Invoice-basis export command.
//!
//! Exports the month's time entries grouped by client as CSV, JSON, or
//! Excel. The output is invoice *basis*: the amounts a rendered invoice
//! would be built from, not a formatted invoice document.

use crate::libs::config::Config;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format for the exported invoice basis
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Custom output file path; a month-stamped name is generated otherwise
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Any date within the month to export (YYYY-MM-DD or 'today')
    #[arg(short, long, default_value = "today")]
    date: String,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let date = parse_date(&args.date)?;

    msg_info!(Message::ExportingData(
        format!("{:?}", args.format),
        date.format("%B %Y").to_string()
    ));

    let config = Config::read()?;
    let exporter = Exporter::new(args.format, args.output, config.export.map(|e| e.output_dir));
    let path = exporter.export_month(date)?;

    msg_success!(Message::ExportCompleted(path.display().to_string()));

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
