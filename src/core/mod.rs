pub mod daily;
pub mod ledger;
pub mod recap;
pub mod warnings;

// Flat public surface for domain types and functions.
pub use daily::DaySummary;
pub use ledger::{format_wire_date, read_ledger_csv, read_ledger_json, Month, StockLedger};
pub use recap::{build_recap, RecapError, RecapReport};
pub use warnings::{LedgerWarning, Warning};
#[allow(unused_imports)]
pub use daily::aggregate_daily;
#[allow(unused_imports)]
pub use ledger::{parse_wire_date, LedgerError, Transaction, TransactionKind};
#[allow(unused_imports)]
pub use recap::FuelRecap;
