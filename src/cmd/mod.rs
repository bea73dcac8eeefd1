pub mod daily;
pub mod html_report;
pub mod recap;
pub mod schema;
pub mod validate;

use crate::core::{read_ledger_csv, read_ledger_json, StockLedger};
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LedgerFormat {
    Json,
    Csv,
}

/// Read a ledger from a file, or stdin with "-". Format defaults by file
/// extension (`.csv` reads CSV, anything else JSON; stdin defaults to JSON).
pub fn read_ledger(path: &Path, format: Option<LedgerFormat>) -> anyhow::Result<StockLedger> {
    if path.as_os_str() == "-" {
        read_from_stdin(format)
    } else {
        read_from_file(path, format)
    }
}

fn detect_format(path: &Path) -> LedgerFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => LedgerFormat::Csv,
        _ => LedgerFormat::Json,
    }
}

fn read_from_file(path: &Path, format: Option<LedgerFormat>) -> anyhow::Result<StockLedger> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match format.unwrap_or_else(|| detect_format(path)) {
        LedgerFormat::Json => read_ledger_json(reader),
        LedgerFormat::Csv => read_ledger_csv(reader),
    }
}

fn read_from_stdin(format: Option<LedgerFormat>) -> anyhow::Result<StockLedger> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    let cursor = io::Cursor::new(buffer);
    match format.unwrap_or(LedgerFormat::Json) {
        LedgerFormat::Json => read_ledger_json(cursor),
        LedgerFormat::Csv => read_ledger_csv(cursor),
    }
}
