//! Calendar consolidation: per-fuel day summaries plus the sorted union of
//! all dates, ready for table rendering.

use crate::core::daily::{aggregate_daily, sorted_by_day, DaySummary};
use crate::core::ledger::StockLedger;
use crate::core::warnings::{self, LedgerWarning};
use chrono::NaiveDate;

/// Day summaries for one fuel type, ascending by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuelRecap {
    pub fuel: String,
    pub days: Vec<DaySummary>,
}

/// The consolidated recap: row axis, column axis and per-fuel summaries.
#[derive(Debug, Clone)]
pub struct RecapReport {
    /// Full column axis, including fuel types that contributed no rows
    pub fuel_types: Vec<String>,
    /// Only fuel types with at least one day of history, in axis order
    pub fuels: Vec<FuelRecap>,
    /// Sorted union of all distinct dates across fuel types
    pub dates: Vec<NaiveDate>,
    pub warnings: Vec<LedgerWarning>,
}

impl RecapReport {
    /// The summary for a fuel type on a date, if that day saw transactions.
    pub fn day(&self, fuel: &str, date: NaiveDate) -> Option<&DaySummary> {
        self.fuels
            .iter()
            .find(|f| f.fuel == fuel)?
            .days
            .iter()
            .find(|d| d.date == date)
    }
}

/// Why a recap could not be produced. Both are expected conditions the
/// caller turns into a user-facing message, not failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecapError {
    /// No fuel types or no histories at all
    #[error("no fuel stock data available - record daily stock transactions first")]
    NoStockData,
    /// Source data present, but every listed fuel type has an empty history
    #[error("transaction history is empty for every fuel type - nothing to recap")]
    NoTableRows,
}

/// Build the consolidated recap for a ledger.
///
/// Fuel types without history are skipped. Recomputes everything from the
/// full histories on every call.
pub fn build_recap(ledger: &StockLedger) -> Result<RecapReport, RecapError> {
    if ledger.fuel_types.is_empty() || ledger.histories.is_empty() {
        return Err(RecapError::NoStockData);
    }

    let mut fuels = Vec::new();
    let mut warnings = Vec::new();
    for fuel in &ledger.fuel_types {
        let history = match ledger.history(fuel) {
            Some(history) if !history.is_empty() => history,
            _ => {
                log::debug!("no history for fuel type {fuel}, skipping");
                continue;
            }
        };
        warnings.extend(warnings::scan_history(fuel, &sorted_by_day(history)));
        fuels.push(FuelRecap {
            fuel: fuel.clone(),
            days: aggregate_daily(history),
        });
    }

    if fuels.is_empty() {
        return Err(RecapError::NoTableRows);
    }

    let mut dates: Vec<NaiveDate> = fuels
        .iter()
        .flat_map(|f| f.days.iter().map(|d| d.date))
        .collect();
    dates.sort();
    dates.dedup();

    Ok(RecapReport {
        fuel_types: ledger.fuel_types.clone(),
        fuels,
        dates,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::{parse_wire_date, Transaction, TransactionKind};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn tx(date: &str, kind: TransactionKind, amount: Decimal, stock_after: Decimal) -> Transaction {
        Transaction {
            date: parse_wire_date(date).unwrap(),
            kind,
            amount,
            stock_after,
            sequence: None,
        }
    }

    fn two_fuel_ledger() -> StockLedger {
        let mut ledger = StockLedger {
            fuel_types: vec!["Pertalite".to_string(), "Solar".to_string()],
            ..Default::default()
        };
        ledger.histories.insert(
            "Pertalite".to_string(),
            vec![
                tx("01/03/2024", TransactionKind::InitialStock, dec!(100), dec!(100)),
                tx("05/03/2024", TransactionKind::Usage, dec!(20), dec!(80)),
            ],
        );
        ledger.histories.insert(
            "Solar".to_string(),
            vec![tx(
                "03/03/2024",
                TransactionKind::InitialStock,
                dec!(200),
                dec!(200),
            )],
        );
        ledger
    }

    #[test]
    fn calendar_union_is_sorted_and_deduplicated() {
        let report = build_recap(&two_fuel_ledger()).unwrap();
        let dates: Vec<String> = report
            .dates
            .iter()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .collect();
        assert_eq!(dates, vec!["01/03/2024", "03/03/2024", "05/03/2024"]);
    }

    #[test]
    fn every_bucket_date_appears_in_the_axis() {
        let report = build_recap(&two_fuel_ledger()).unwrap();
        for fuel in &report.fuels {
            for day in &fuel.days {
                assert!(report.dates.contains(&day.date));
            }
        }
    }

    #[test]
    fn fuel_without_bucket_for_a_date_is_absent_not_synthesized() {
        let report = build_recap(&two_fuel_ledger()).unwrap();
        let solar_only_day = parse_wire_date("03/03/2024").unwrap();
        assert!(report.day("Solar", solar_only_day).is_some());
        assert!(report.day("Pertalite", solar_only_day).is_none());
    }

    #[test]
    fn empty_ledger_reports_no_stock_data() {
        assert_eq!(
            build_recap(&StockLedger::default()).unwrap_err(),
            RecapError::NoStockData
        );

        let no_histories = StockLedger {
            fuel_types: vec!["Solar".to_string()],
            ..Default::default()
        };
        assert_eq!(
            build_recap(&no_histories).unwrap_err(),
            RecapError::NoStockData
        );
    }

    #[test]
    fn all_histories_empty_reports_no_table_rows() {
        let mut ledger = StockLedger {
            fuel_types: vec!["Solar".to_string()],
            ..Default::default()
        };
        ledger.histories.insert("Solar".to_string(), Vec::new());
        assert_eq!(build_recap(&ledger).unwrap_err(), RecapError::NoTableRows);
    }

    #[test]
    fn unlisted_history_is_ignored() {
        let mut ledger = two_fuel_ledger();
        ledger.histories.insert(
            "Dexlite".to_string(),
            vec![tx(
                "09/03/2024",
                TransactionKind::InitialStock,
                dec!(10),
                dec!(10),
            )],
        );
        let report = build_recap(&ledger).unwrap();
        assert_eq!(report.fuels.len(), 2);
        assert!(!report.dates.contains(&parse_wire_date("09/03/2024").unwrap()));
    }

    #[test]
    fn warnings_are_anchored_to_fuel_and_date() {
        let mut ledger = two_fuel_ledger();
        ledger
            .histories
            .get_mut("Pertalite")
            .unwrap()
            .push(tx("05/03/2024", TransactionKind::Usage, dec!(10), dec!(70)));
        let report = build_recap(&ledger).unwrap();
        assert!(report
            .warnings
            .iter()
            .any(|w| w.fuel == "Pertalite"
                && w.date == parse_wire_date("05/03/2024").unwrap()));
    }
}
