//! Input data model: fuel types, transaction histories and wire parsing.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid date {raw:?}: expected dd/mm/yyyy")]
    InvalidDate { raw: String },
    #[error("invalid month {raw:?}: expected mm/yyyy")]
    InvalidMonth { raw: String },
}

/// Kind of stock transaction, tagged by the label recorded in the ledger.
///
/// Labels not matching one of the known kinds are preserved as [`Other`];
/// they are invisible to the incoming/outgoing detectors but still carry a
/// `stock_after` level.
///
/// [`Other`]: TransactionKind::Other
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Opening stock entry ("Input Stok Awal")
    InitialStock,
    /// Stock replenishment ("Tambah Stok")
    AddStock,
    /// Stock consumption ("Penggunaan")
    Usage,
    /// Unrecognised label, kept verbatim
    Other(String),
}

impl TransactionKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Input Stok Awal" => TransactionKind::InitialStock,
            "Tambah Stok" => TransactionKind::AddStock,
            "Penggunaan" => TransactionKind::Usage,
            other => TransactionKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TransactionKind::InitialStock => "Input Stok Awal",
            TransactionKind::AddStock => "Tambah Stok",
            TransactionKind::Usage => "Penggunaan",
            TransactionKind::Other(label) => label,
        }
    }

    /// True for kinds that bring stock in.
    pub fn is_incoming(&self) -> bool {
        matches!(
            self,
            TransactionKind::InitialStock | TransactionKind::AddStock
        )
    }

    /// True for kinds that take stock out.
    pub fn is_outgoing(&self) -> bool {
        matches!(self, TransactionKind::Usage)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for TransactionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(TransactionKind::from_label(&label))
    }
}

/// A single stock movement as recorded in the daily ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    /// Day the movement was recorded (dd/mm/yyyy)
    #[serde(with = "wire_date")]
    #[schemars(with = "String")]
    pub date: NaiveDate,
    /// Recorded kind label
    #[serde(rename = "transaction_type")]
    #[schemars(with = "String")]
    pub kind: TransactionKind,
    /// Quantity moved by this transaction
    #[schemars(with = "f64")]
    pub amount: Decimal,
    /// Stock level immediately after this transaction
    #[schemars(with = "f64")]
    pub stock_after: Decimal,
    /// Explicit ordering within the day. Recorded order is used when absent,
    /// which is ambiguous once a day has several transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
}

/// The full per-fuel transaction history plus the fuel type axis.
///
/// Owned and loaded by the caller, handed to the aggregator per call. Fuel
/// types without a history entry are skipped; histories for fuel types not
/// listed in `fuel_types` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct StockLedger {
    /// Fuel types in report column order
    pub fuel_types: Vec<String>,
    /// Transaction history per fuel type, in recorded order
    #[serde(default)]
    pub histories: HashMap<String, Vec<Transaction>>,
}

impl StockLedger {
    pub fn history(&self, fuel: &str) -> Option<&[Transaction]> {
        self.histories.get(fuel).map(Vec::as_slice)
    }
}

/// Parse a ledger wire date (dd/mm/yyyy, unpadded digits accepted).
pub fn parse_wire_date(s: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y").map_err(|_| LedgerError::InvalidDate {
        raw: s.to_string(),
    })
}

/// Format a date in the ledger wire format.
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub(crate) mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_wire_date(&s).map_err(serde::de::Error::custom)
    }
}

/// A calendar month used to filter report rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for Month {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidMonth { raw: s.to_string() };
        let (month, year) = s.trim().split_once('/').ok_or_else(invalid)?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Month { year, month })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Read a whole ledger from JSON
pub fn read_ledger_json<R: Read>(reader: R) -> anyhow::Result<StockLedger> {
    let ledger: StockLedger = serde_json::from_reader(reader)?;
    Ok(ledger)
}

/// Flat CSV row for ledger import/export
#[derive(Debug, Serialize, Deserialize)]
pub struct CsvTransaction {
    pub fuel_type: String,
    pub date: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub stock_after: Decimal,
    #[serde(default)]
    pub sequence: Option<u32>,
}

/// Read a ledger from flat CSV. Fuel type order is first appearance.
pub fn read_ledger_csv<R: Read>(reader: R) -> anyhow::Result<StockLedger> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut ledger = StockLedger::default();

    for (row, record) in rdr.deserialize().enumerate() {
        let record: CsvTransaction = record?;
        let date = parse_wire_date(&record.date).map_err(|err| {
            anyhow::anyhow!("row {}, fuel type {}: {err}", row + 1, record.fuel_type)
        })?;
        let tx = Transaction {
            date,
            kind: TransactionKind::from_label(&record.transaction_type),
            amount: record.amount,
            stock_after: record.stock_after,
            sequence: record.sequence,
        };
        if !ledger.fuel_types.contains(&record.fuel_type) {
            ledger.fuel_types.push(record.fuel_type.clone());
        }
        ledger.histories.entry(record.fuel_type).or_default().push(tx);
    }

    Ok(ledger)
}
