use crate::db::timers::TimerRecord;
use crate::libs::client::Client;
use crate::libs::entry::EntryRow;
use crate::libs::formatter::{format_elapsed, format_minutes};
use crate::libs::product::Product;
use anyhow::Result;
use chrono::Duration;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn clients(clients: &[Client]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "EMAIL", "PHONE"]);
        for client in clients {
            table.add_row(row![
                client.id.unwrap_or(0),
                client.name,
                client.email.as_deref().unwrap_or("-"),
                client.phone.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn products(products: &[Product]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "UNIT", "RATE"]);
        for product in products {
            table.add_row(row![
                product.id.unwrap_or(0),
                product.name,
                product.unit,
                product.rate.map_or_else(|| "-".to_string(), |r| format!("{:.2}", r))
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn entries(rows: &[EntryRow]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "CLIENT", "PRODUCT", "DESCRIPTION", "START", "END", "ACTUAL", "BILLED"]);
        for row in rows {
            table.add_row(row![
                row.entry.id,
                row.client_name,
                row.product_name.as_deref().unwrap_or("-"),
                row.entry.description.as_deref().unwrap_or("-"),
                row.entry.start.format("%H:%M"),
                row.entry.end.format("%H:%M"),
                format_minutes(row.entry.actual_minutes),
                format_minutes(row.entry.billed_minutes)
            ]);
        }
        table.printstd();

        let actual: i64 = rows.iter().map(|r| r.entry.actual_minutes).sum();
        let billed: i64 = rows.iter().map(|r| r.entry.billed_minutes).sum();
        println!("Total: {} actual, {} billed", format_minutes(actual), format_minutes(billed));

        Ok(())
    }

    /// Per-client monthly totals: (client, actual minutes, billed minutes, amount).
    pub fn client_totals(totals: &[(String, i64, i64, Option<f64>)]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["CLIENT", "ACTUAL", "BILLED", "AMOUNT"]);
        for (client, actual, billed, amount) in totals {
            table.add_row(row![
                client,
                format_minutes(*actual),
                format_minutes(*billed),
                amount.map_or_else(|| "-".to_string(), |a| format!("{:.2}", a))
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn timer_status(record: &TimerRecord, client_name: &str, elapsed: &Duration) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["STATUS", "STARTED", "ELAPSED", "CLIENT", "DESCRIPTION"]);
        table.add_row(row![
            record.status.as_str(),
            record.start.format("%H:%M"),
            format_elapsed(elapsed),
            client_name,
            record.description.as_deref().unwrap_or("-")
        ]);
        table.printstd();

        Ok(())
    }
}
