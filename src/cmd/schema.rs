//! Schema command - print expected input formats

use crate::core::StockLedger;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or csv-header
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the ledger document
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(StockLedger);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", CSV_COLUMNS.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("CSV Input Format");
        println!("================");
        println!();
        for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
            let req = if *required { "required" } else { "optional" };
            println!("{:20} ({:8})  {}", name, req, description);
        }
        println!();
        println!("Fuel type column order: report columns follow first appearance");
        Ok(())
    }
}

const CSV_COLUMNS: &[&str] = &[
    "fuel_type",
    "date",
    "transaction_type",
    "amount",
    "stock_after",
    "sequence",
];

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("fuel_type", true, "Fuel type this transaction belongs to"),
    ("date", true, "Transaction date (dd/mm/yyyy)"),
    (
        "transaction_type",
        true,
        "Input Stok Awal, Tambah Stok or Penggunaan; other labels only move the stock level",
    ),
    ("amount", true, "Quantity moved by this transaction"),
    (
        "stock_after",
        true,
        "Stock level immediately after this transaction",
    ),
    (
        "sequence",
        false,
        "Explicit ordering within the day (recorded order when absent)",
    ),
];
