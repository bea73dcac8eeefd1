//! Recap command - consolidated daily movement table across fuel types

use crate::cmd::{read_ledger, LedgerFormat};
use crate::core::{build_recap, format_wire_date, Month, RecapError, RecapReport};
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Cell content for a day without data or without movement
const PLACEHOLDER: &str = "-";

#[derive(Args, Debug)]
pub struct RecapCommand {
    /// Ledger file (JSON or CSV). Reads from stdin if not specified.
    #[arg(short, long, default_value = "-")]
    ledger: PathBuf,

    /// Input format (default: by file extension)
    #[arg(long, value_enum)]
    format: Option<LedgerFormat>,

    /// Filter rows by month (mm/yyyy)
    #[arg(short, long)]
    month: Option<Month>,

    /// Filter by fuel type (e.g., Pertalite, Solar)
    #[arg(short, long)]
    fuel: Option<String>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Recap data for JSON output
#[derive(Debug, Serialize)]
struct RecapData {
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<String>,
    dates: Vec<String>,
    fuels: Vec<FuelData>,
}

#[derive(Debug, Serialize)]
struct FuelData {
    fuel: String,
    days: Vec<DayData>,
}

#[derive(Debug, Serialize)]
struct DayData {
    date: String,
    opening_stock: String,
    first_incoming: String,
    last_outgoing: String,
    closing_stock: String,
}

impl RecapCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let ledger = read_ledger(&self.ledger, self.format)?;
        let report = match build_recap(&ledger) {
            Ok(report) => report,
            Err(err @ (RecapError::NoStockData | RecapError::NoTableRows)) => {
                println!("{err}");
                return Ok(());
            }
        };

        let fuel_types = filter_fuel_types(&report, self.fuel.as_deref());
        if fuel_types.is_empty() {
            println!("No fuel type matching {:?}", self.fuel.as_deref().unwrap_or(""));
            return Ok(());
        }
        let dates: Vec<NaiveDate> = report
            .dates
            .iter()
            .copied()
            .filter(|d| self.month.is_none_or(|m| m.contains(*d)))
            .collect();
        if dates.is_empty() {
            println!("No movements found matching filters");
            return Ok(());
        }

        if self.json {
            self.print_json(&report, &fuel_types, &dates)
        } else {
            self.print_table(&report, &fuel_types, &dates);
            Ok(())
        }
    }

    fn print_table(&self, report: &RecapReport, fuel_types: &[String], dates: &[NaiveDate]) {
        let mut builder = Builder::default();

        let mut header = vec!["Date".to_string()];
        for fuel in fuel_types {
            header.push(format!("{fuel} Opening"));
            header.push(format!("{fuel} In (First)"));
            header.push(format!("{fuel} Out (Last)"));
            header.push(format!("{fuel} Closing"));
        }
        builder.push_record(header);

        for date in dates {
            let mut row = vec![format_wire_date(*date)];
            for fuel in fuel_types {
                match report.day(fuel, *date) {
                    Some(day) => {
                        row.push(format_qty(day.opening_stock));
                        row.push(format_movement(day.first_incoming));
                        row.push(format_movement(day.last_outgoing));
                        row.push(format_qty(day.closing_stock));
                    }
                    None => row.extend((0..4).map(|_| PLACEHOLDER.to_string())),
                }
            }
            builder.push_record(row);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()));

        println!();
        match &self.month {
            Some(month) => println!("DAILY STOCK RECAP ({month})"),
            None => println!("DAILY STOCK RECAP"),
        }
        println!();
        println!("{table}");
    }

    fn print_json(
        &self,
        report: &RecapReport,
        fuel_types: &[String],
        dates: &[NaiveDate],
    ) -> anyhow::Result<()> {
        let fuels = fuel_types
            .iter()
            .map(|fuel| FuelData {
                fuel: fuel.clone(),
                days: dates
                    .iter()
                    .filter_map(|date| report.day(fuel, *date))
                    .map(|day| DayData {
                        date: format_wire_date(day.date),
                        opening_stock: format_qty(day.opening_stock),
                        first_incoming: format_qty(day.first_incoming),
                        last_outgoing: format_qty(day.last_outgoing),
                        closing_stock: format_qty(day.closing_stock),
                    })
                    .collect(),
            })
            .collect();

        let data = RecapData {
            month: self.month.map(|m| m.to_string()),
            dates: dates.iter().copied().map(format_wire_date).collect(),
            fuels,
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

fn filter_fuel_types(report: &RecapReport, fuel: Option<&str>) -> Vec<String> {
    report
        .fuel_types
        .iter()
        .filter(|f| fuel.is_none_or(|wanted| f.eq_ignore_ascii_case(wanted)))
        .cloned()
        .collect()
}

/// Zero incoming/outgoing means "no movement" and renders as a placeholder.
fn format_movement(qty: Decimal) -> String {
    if qty.is_zero() {
        PLACEHOLDER.to_string()
    } else {
        format_qty(qty)
    }
}

fn format_qty(qty: Decimal) -> String {
    let s = format!("{:.3}", qty);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
