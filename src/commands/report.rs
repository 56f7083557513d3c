use crate::db::{entries::TimeEntries, products::Products};
use crate::libs::entry::EntryFilter;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::collections::HashMap;

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(long, short, default_value = "today", help = "Date to report on (YYYY-MM-DD or 'today')")]
    date: String,

    #[arg(long, help = "Aggregate the whole month per client")]
    month: bool,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let date = parse_date(&args.date)?;

    if args.month {
        month_report(date)
    } else {
        day_report(date)
    }
}

fn day_report(date: NaiveDate) -> Result<()> {
    let rows = TimeEntries::new()?.fetch_rows(EntryFilter::Day(date))?;
    if rows.is_empty() {
        msg_info!(Message::EntriesNotFound(date.format("%B %-d, %Y").to_string()));
        return Ok(());
    }

    msg_print!(Message::ReportTitle(date.format("%B %-d, %Y").to_string()), true);
    View::entries(&rows)?;

    Ok(())
}

fn month_report(date: NaiveDate) -> Result<()> {
    let rows = TimeEntries::new()?.fetch_rows(EntryFilter::Month(date))?;
    if rows.is_empty() {
        msg_info!(Message::NoEntriesForMonth(date.format("%B %Y").to_string()));
        return Ok(());
    }

    let rates: HashMap<i64, f64> = Products::new()?
        .fetch_all()?
        .into_iter()
        .filter_map(|p| p.id.zip(p.rate))
        .collect();

    // Per-client totals in first-seen order
    let mut totals: Vec<(String, i64, i64, Option<f64>)> = Vec::new();
    for row in &rows {
        let index = match totals.iter().position(|(client, ..)| *client == row.client_name) {
            Some(index) => index,
            None => {
                totals.push((row.client_name.clone(), 0, 0, None));
                totals.len() - 1
            }
        };
        let (_, actual, billed, amount) = &mut totals[index];
        *actual += row.entry.actual_minutes;
        *billed += row.entry.billed_minutes;
        if let Some(rate) = row.entry.product_id.and_then(|id| rates.get(&id)) {
            let line_amount = rate * row.entry.billed_minutes as f64 / 60.0;
            let current = amount.unwrap_or(0.0);
            *amount = Some(current + line_amount);
        }
    }

    msg_print!(Message::MonthTitle(date.format("%B %Y").to_string()), true);
    View::client_totals(&totals)?;

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
