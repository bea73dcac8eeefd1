//! HTML report generation for the daily stock recap
//!
//! Generates a self-contained HTML file with embedded CSS: one row per date,
//! a four-column group per fuel type with a grouped header.

use crate::cmd::{read_ledger, LedgerFormat};
use crate::core::{build_recap, format_wire_date, Month, RecapError, RecapReport};
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct HtmlCommand {
    /// Ledger file (JSON or CSV). Reads from stdin if not specified.
    #[arg(short, long, default_value = "-")]
    ledger: PathBuf,

    /// Input format (default: by file extension)
    #[arg(long, value_enum)]
    format: Option<LedgerFormat>,

    /// Filter rows by month (mm/yyyy)
    #[arg(short, long)]
    month: Option<Month>,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl HtmlCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let ledger = read_ledger(&self.ledger, self.format)?;
        let report = match build_recap(&ledger) {
            Ok(report) => report,
            Err(err @ (RecapError::NoStockData | RecapError::NoTableRows)) => {
                println!("{err}");
                return Ok(());
            }
        };

        let dates: Vec<NaiveDate> = report
            .dates
            .iter()
            .copied()
            .filter(|d| self.month.is_none_or(|m| m.contains(*d)))
            .collect();

        let html = generate(&report, &dates, self.month);

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &html)?;
            println!("HTML recap written to: {}", output_path.display());
        } else {
            // Write to temp file and open in browser
            let temp_path = std::env::temp_dir().join("bbm-recap.html");
            std::fs::write(&temp_path, &html)?;
            opener::open(&temp_path)?;
            println!("Opened HTML recap in browser: {}", temp_path.display());
        }

        Ok(())
    }
}

/// Generate the HTML recap document
pub fn generate(report: &RecapReport, dates: &[NaiveDate], month: Option<Month>) -> String {
    let title = match month {
        Some(month) => format!("Daily Stock Recap {month}"),
        None => "Daily Stock Recap".to_string(),
    };

    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", escape(&title)));
    body.push_str("<table>\n");

    // Two header rows: fuel type groups, then the movement columns.
    body.push_str("<thead><tr><th rowspan=\"2\">Date</th>");
    for fuel in &report.fuel_types {
        body.push_str(&format!("<th colspan=\"4\">{}</th>", escape(fuel)));
    }
    body.push_str("</tr><tr>");
    for _ in &report.fuel_types {
        body.push_str("<th>Opening</th><th>In (First)</th><th>Out (Last)</th><th>Closing</th>");
    }
    body.push_str("</tr></thead>\n");

    body.push_str("<tbody>\n");
    for date in dates {
        body.push_str(&format!("<tr><td>{}</td>", format_wire_date(*date)));
        for fuel in &report.fuel_types {
            match report.day(fuel, *date) {
                Some(day) => body.push_str(&format!(
                    "<td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
                    format_qty(day.opening_stock),
                    format_movement(day.first_incoming),
                    format_movement(day.last_outgoing),
                    format_qty(day.closing_stock),
                )),
                None => body.push_str("<td>-</td><td>-</td><td>-</td><td>-</td>"),
            }
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n");
    body.push_str("</table>\n");

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(&title),
        STYLE,
        body
    )
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }\n\
table { border-collapse: collapse; }\n\
th, td { border: 1px solid #999; padding: 0.3em 0.7em; text-align: right; }\n\
th { background: #eee; }\n\
td:first-child { text-align: left; }\n";

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_movement(qty: Decimal) -> String {
    if qty.is_zero() {
        "-".to_string()
    } else {
        format_qty(qty)
    }
}

fn format_qty(qty: Decimal) -> String {
    let s = format!("{:.3}", qty);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::{parse_wire_date, StockLedger, Transaction, TransactionKind};
    use rust_decimal_macros::dec;

    #[test]
    fn generated_table_groups_columns_and_fills_gaps() {
        let mut ledger = StockLedger {
            fuel_types: vec!["Pertalite".to_string(), "Solar".to_string()],
            ..Default::default()
        };
        ledger.histories.insert(
            "Pertalite".to_string(),
            vec![Transaction {
                date: parse_wire_date("01/03/2024").unwrap(),
                kind: TransactionKind::InitialStock,
                amount: dec!(100),
                stock_after: dec!(100),
                sequence: None,
            }],
        );
        let report = build_recap(&ledger).unwrap();
        let html = generate(&report, &report.dates, None);

        assert!(html.contains("<th colspan=\"4\">Pertalite</th>"));
        assert!(html.contains("<th colspan=\"4\">Solar</th>"));
        assert!(html.contains("<td>01/03/2024</td>"));
        // Solar has no data on the only date: four placeholder cells
        assert!(html.contains("<td>-</td><td>-</td><td>-</td><td>-</td>"));
    }

    #[test]
    fn fuel_labels_are_escaped() {
        let mut ledger = StockLedger {
            fuel_types: vec!["A<B>".to_string()],
            ..Default::default()
        };
        ledger.histories.insert(
            "A<B>".to_string(),
            vec![Transaction {
                date: parse_wire_date("01/03/2024").unwrap(),
                kind: TransactionKind::InitialStock,
                amount: dec!(10),
                stock_after: dec!(10),
                sequence: None,
            }],
        );
        let report = build_recap(&ledger).unwrap();
        let html = generate(&report, &report.dates, None);
        assert!(html.contains("A&lt;B&gt;"));
        assert!(!html.contains("A<B>"));
    }
}
