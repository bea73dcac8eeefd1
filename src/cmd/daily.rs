//! Daily command - flat per-fuel daily movement listing

use crate::cmd::{read_ledger, LedgerFormat};
use crate::core::{build_recap, format_wire_date, DaySummary, Month, RecapError};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct DailyCommand {
    /// Ledger file (JSON or CSV). Reads from stdin if not specified.
    #[arg(short, long, default_value = "-")]
    ledger: PathBuf,

    /// Input format (default: by file extension)
    #[arg(long, value_enum)]
    format: Option<LedgerFormat>,

    /// Filter by month (mm/yyyy)
    #[arg(short, long)]
    month: Option<Month>,

    /// Filter by fuel type (e.g., Pertalite, Solar)
    #[arg(short, long)]
    fuel: Option<String>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the daily movements output
#[derive(Debug, Clone, Tabled, Serialize)]
struct DailyRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Fuel")]
    fuel: String,
    #[tabled(rename = "Opening")]
    opening_stock: String,
    #[tabled(rename = "In (First)")]
    first_incoming: String,
    #[tabled(rename = "Out (Last)")]
    last_outgoing: String,
    #[tabled(rename = "Closing")]
    closing_stock: String,
}

#[derive(Debug, Serialize)]
struct DailyOutput {
    entries: Vec<DailyRow>,
}

impl DailyCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let ledger = read_ledger(&self.ledger, self.format)?;
        let report = match build_recap(&ledger) {
            Ok(report) => report,
            Err(err @ (RecapError::NoStockData | RecapError::NoTableRows)) => {
                println!("{err}");
                return Ok(());
            }
        };

        let mut rows = Vec::new();
        for date in &report.dates {
            if self.month.is_some_and(|m| !m.contains(*date)) {
                continue;
            }
            for fuel in &report.fuels {
                if self
                    .fuel
                    .as_deref()
                    .is_some_and(|wanted| !fuel.fuel.eq_ignore_ascii_case(wanted))
                {
                    continue;
                }
                if let Some(day) = report.day(&fuel.fuel, *date) {
                    rows.push(to_row(&fuel.fuel, day));
                }
            }
        }

        if self.json {
            let output = DailyOutput { entries: rows };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        } else if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[DailyRow]) {
        if rows.is_empty() {
            println!("No daily movements found matching filters");
            return;
        }

        println!();
        println!("DAILY MOVEMENTS");
        println!();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn write_csv(&self, rows: &[DailyRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn to_row(fuel: &str, day: &DaySummary) -> DailyRow {
    DailyRow {
        date: format_wire_date(day.date),
        fuel: fuel.to_string(),
        opening_stock: format_qty(day.opening_stock),
        first_incoming: format_qty(day.first_incoming),
        last_outgoing: format_qty(day.last_outgoing),
        closing_stock: format_qty(day.closing_stock),
    }
}

fn format_qty(qty: Decimal) -> String {
    let s = format!("{:.3}", qty);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
