//! Validate command - surface data quality issues without generating full reports

use crate::cmd::{read_ledger, LedgerFormat};
use crate::core::{
    build_recap, format_wire_date, LedgerWarning, Month, RecapError, Warning,
};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Ledger file (JSON or CSV). Reads from stdin if not specified.
    #[arg(short, long, default_value = "-")]
    ledger: PathBuf,

    /// Input format (default: by file extension)
    #[arg(long, value_enum)]
    format: Option<LedgerFormat>,

    /// Filter by month (mm/yyyy)
    #[arg(short, long)]
    month: Option<Month>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Clone, Serialize)]
struct ValidationIssue {
    #[serde(rename = "type")]
    issue_type: String,
    fuel: String,
    date: String,
    message: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let ledger = read_ledger(&self.ledger, self.format)?;
        let report = match build_recap(&ledger) {
            Ok(report) => report,
            Err(err @ (RecapError::NoStockData | RecapError::NoTableRows)) => {
                println!("{err}");
                return Ok(());
            }
        };

        let issues: Vec<ValidationIssue> = report
            .warnings
            .iter()
            .filter(|w| self.month.is_none_or(|m| m.contains(w.date)))
            .map(to_issue)
            .collect();

        if self.json {
            self.print_json(&issues)?;
        } else {
            self.print_text(&issues);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, issues: &[ValidationIssue]) {
        println!();
        println!("VALIDATION RESULTS");
        println!();

        if issues.is_empty() {
            println!("\u{2713} No issues found.");
        } else {
            println!("\u{26A0} {} issue(s) found:", issues.len());
            println!();

            for (i, issue) in issues.iter().enumerate() {
                println!(
                    "  {}. [{}] {} {}",
                    i + 1,
                    issue.issue_type,
                    issue.date,
                    issue.fuel
                );
                println!("     {}", issue.message);
                println!();
            }
        }
    }

    fn print_json(&self, issues: &[ValidationIssue]) -> anyhow::Result<()> {
        let output = ValidationOutput {
            issue_count: issues.len(),
            issues: issues.to_vec(),
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn to_issue(warning: &LedgerWarning) -> ValidationIssue {
    ValidationIssue {
        issue_type: warning_type_name(&warning.warning),
        fuel: warning.fuel.clone(),
        date: format_wire_date(warning.date),
        message: warning_message(&warning.warning),
    }
}

fn warning_type_name(warning: &Warning) -> String {
    match warning {
        Warning::AmbiguousDayOrder { .. } => "AmbiguousDayOrder".to_string(),
        Warning::UnknownTransactionKind { .. } => "UnknownTransactionKind".to_string(),
        Warning::InconsistentStockLevel { .. } => "InconsistentStockLevel".to_string(),
    }
}

fn warning_message(warning: &Warning) -> String {
    match warning {
        Warning::AmbiguousDayOrder { transaction_count } => format!(
            "{transaction_count} same-day transactions without sequence numbers - \
             first/last movement selection depends on recorded order"
        ),
        Warning::UnknownTransactionKind { label } => format!(
            "Transaction type {label:?} is not recognised - it shifts closing stock \
             but is ignored by the movement detectors"
        ),
        Warning::InconsistentStockLevel { expected, actual } => {
            format!("Recorded stock level {actual} does not match expected {expected}")
        }
    }
}
