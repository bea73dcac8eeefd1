//! Data-quality warnings collected while building a recap.

use crate::core::ledger::{Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Findings that do not stop aggregation but need operator review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Warning {
    /// A day has several transactions and not all carry an explicit
    /// sequence number, so first/last selection depends on recorded order.
    AmbiguousDayOrder { transaction_count: usize },
    /// Transaction label not recognised; it shifts closing stock but is
    /// invisible to the incoming/outgoing detectors.
    UnknownTransactionKind { label: String },
    /// `stock_after` disagrees with the running stock adjusted by `amount`.
    InconsistentStockLevel { expected: Decimal, actual: Decimal },
}

/// A warning anchored to the fuel type and day it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerWarning {
    pub fuel: String,
    #[serde(with = "crate::core::ledger::wire_date")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub warning: Warning,
}

/// Scan one fuel type's chronologically ordered history for quality issues.
pub(crate) fn scan_history(fuel: &str, ordered: &[&Transaction]) -> Vec<LedgerWarning> {
    let mut warnings = Vec::new();

    for day in ordered.chunk_by(|a, b| a.date == b.date) {
        if day.len() > 1 && day.iter().any(|tx| tx.sequence.is_none()) {
            log::warn!(
                "{fuel} {}: {} same-day transactions without full sequence numbers",
                day[0].date,
                day.len()
            );
            warnings.push(LedgerWarning {
                fuel: fuel.to_string(),
                date: day[0].date,
                warning: Warning::AmbiguousDayOrder {
                    transaction_count: day.len(),
                },
            });
        }
    }

    let mut level = Decimal::ZERO;
    for tx in ordered {
        let expected = match &tx.kind {
            TransactionKind::InitialStock => Some(tx.amount),
            TransactionKind::AddStock => Some(level + tx.amount),
            TransactionKind::Usage => Some(level - tx.amount),
            TransactionKind::Other(label) => {
                log::warn!("{fuel} {}: unrecognised transaction type {label:?}", tx.date);
                warnings.push(LedgerWarning {
                    fuel: fuel.to_string(),
                    date: tx.date,
                    warning: Warning::UnknownTransactionKind {
                        label: label.clone(),
                    },
                });
                None
            }
        };
        if let Some(expected) = expected {
            if expected != tx.stock_after {
                warnings.push(LedgerWarning {
                    fuel: fuel.to_string(),
                    date: tx.date,
                    warning: Warning::InconsistentStockLevel {
                        expected,
                        actual: tx.stock_after,
                    },
                });
            }
        }
        // Trust the recorded level from here on either way.
        level = tx.stock_after;
    }

    warnings
}
