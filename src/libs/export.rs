//! Invoice-basis export.
//!
//! Writes a month's time entries, grouped per client, to CSV, JSON, or
//! Excel. Lines carry the billed hours and, when the product has a rate,
//! the derived amount. This is raw invoice basis, not a rendered invoice.

use crate::{
    db::{
        entries::TimeEntries,
        products::Products,
    },
    libs::entry::{EntryFilter, EntryRow},
    libs::messages::Message,
    msg_error_anyhow,
};
use anyhow::Result;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

/// Supported export output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values for spreadsheet tools.
    Csv,
    /// Structured JSON grouped per client.
    Json,
    /// Excel workbook with a formatted header row.
    Excel,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

/// One exported entry line.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLine {
    pub client: String,
    pub product: String,
    pub date: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub billed_hours: f64,
    pub amount: Option<f64>,
}

/// A client's lines with totals, used for the grouped JSON output.
#[derive(Debug, Serialize)]
pub struct ClientInvoiceBasis {
    pub client: String,
    pub lines: Vec<InvoiceLine>,
    pub total_billed_hours: f64,
    pub total_amount: Option<f64>,
}

pub struct Exporter {
    format: ExportFormat,
    output: Option<PathBuf>,
    output_dir: Option<String>,
}

impl Exporter {
    pub fn new(format: ExportFormat, output: Option<PathBuf>, output_dir: Option<String>) -> Self {
        Exporter { format, output, output_dir }
    }

    /// Exports the invoice basis for the month containing `date`.
    /// Returns the written file's path.
    pub fn export_month(&self, date: NaiveDate) -> Result<PathBuf> {
        let rows = TimeEntries::new()?.fetch_rows(EntryFilter::Month(date))?;
        if rows.is_empty() {
            return Err(msg_error_anyhow!(Message::NoEntriesForMonth(date.format("%B %Y").to_string())));
        }

        // Rate lookup for amount calculation
        let rates: HashMap<i64, f64> = Products::new()?
            .fetch_all()?
            .into_iter()
            .filter_map(|p| p.id.zip(p.rate))
            .collect();

        let lines: Vec<InvoiceLine> = rows.iter().map(|row| Self::line(row, &rates)).collect();
        let path = self.output_path(date);

        match self.format {
            ExportFormat::Csv => self.write_csv(&path, &lines)?,
            ExportFormat::Json => self.write_json(&path, &lines)?,
            ExportFormat::Excel => self.write_excel(&path, &lines)?,
        }

        Ok(path)
    }

    fn line(row: &EntryRow, rates: &HashMap<i64, f64>) -> InvoiceLine {
        let billed_hours = row.entry.billed_minutes as f64 / 60.0;
        let amount = row
            .entry
            .product_id
            .and_then(|id| rates.get(&id))
            .map(|rate| rate * billed_hours);
        InvoiceLine {
            client: row.client_name.clone(),
            product: row.product_name.clone().unwrap_or_else(|| "-".to_string()),
            date: row.entry.start.format("%Y-%m-%d").to_string(),
            description: row.entry.description.clone().unwrap_or_default(),
            start: row.entry.start.format("%H:%M").to_string(),
            end: row.entry.end.format("%H:%M").to_string(),
            billed_hours,
            amount,
        }
    }

    fn output_path(&self, date: NaiveDate) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let file_name = format!("tidvis_invoice_basis_{}.{}", date.format("%Y%m"), self.format.extension());
        match &self.output_dir {
            Some(dir) => PathBuf::from(dir).join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    fn write_csv(&self, path: &PathBuf, lines: &[InvoiceLine]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for line in lines {
            writer.serialize(line)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json(&self, path: &PathBuf, lines: &[InvoiceLine]) -> Result<()> {
        let grouped = Self::group_by_client(lines);
        let file = File::create(path)?;
        serde_json::to_writer_pretty(&file, &grouped)?;
        Ok(())
    }

    fn write_excel(&self, path: &PathBuf, lines: &[InvoiceLine]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let bold = Format::new().set_bold();

        let headers = ["Client", "Product", "Date", "Description", "Start", "End", "Billed hours", "Amount"];
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(0, col as u16, *header, &bold)?;
        }

        for (i, line) in lines.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write_string(row, 0, &line.client)?;
            worksheet.write_string(row, 1, &line.product)?;
            worksheet.write_string(row, 2, &line.date)?;
            worksheet.write_string(row, 3, &line.description)?;
            worksheet.write_string(row, 4, &line.start)?;
            worksheet.write_string(row, 5, &line.end)?;
            worksheet.write_number(row, 6, line.billed_hours)?;
            if let Some(amount) = line.amount {
                worksheet.write_number(row, 7, amount)?;
            }
        }

        workbook.save(path)?;
        Ok(())
    }

    fn group_by_client(lines: &[InvoiceLine]) -> Vec<ClientInvoiceBasis> {
        let mut grouped: Vec<ClientInvoiceBasis> = Vec::new();
        for line in lines {
            let index = match grouped.iter().position(|g| g.client == line.client) {
                Some(index) => index,
                None => {
                    grouped.push(ClientInvoiceBasis {
                        client: line.client.clone(),
                        lines: Vec::new(),
                        total_billed_hours: 0.0,
                        total_amount: None,
                    });
                    grouped.len() - 1
                }
            };
            let basis = &mut grouped[index];
            basis.total_billed_hours += line.billed_hours;
            if let Some(amount) = line.amount {
                basis.total_amount = Some(basis.total_amount.unwrap_or(0.0) + amount);
            }
            basis.lines.push(line.clone());
        }
        grouped
    }
}
