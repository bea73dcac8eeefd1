//! Daily aggregation: collapse one fuel type's transaction history into
//! per-day movement summaries.

use crate::core::ledger::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Movement summary for one fuel type on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Closing stock of the prior day, 0 when there is none
    pub opening_stock: Decimal,
    /// Amount of the first incoming transaction of the day, 0 when none
    pub first_incoming: Decimal,
    /// Amount of the last outgoing transaction of the day, 0 when none
    pub last_outgoing: Decimal,
    /// `stock_after` of the last transaction processed for the day
    pub closing_stock: Decimal,
}

struct DayBucket<'a> {
    opening_stock: Decimal,
    closing_stock: Decimal,
    transactions: Vec<&'a Transaction>,
}

/// Sort a history chronologically. Within a day, explicit sequence numbers
/// order the transactions; records without one keep recorded order and sort
/// before sequenced ones.
pub(crate) fn sorted_by_day(history: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = history.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.sequence.cmp(&b.sequence)));
    ordered
}

/// Aggregate one fuel type's history into day summaries, ascending by date.
///
/// Pure function of its input: every call recomputes from the full history.
/// Days with no transactions produce no summary. Closing stock carries over
/// as the next day's opening stock, starting from 0.
pub fn aggregate_daily(history: &[Transaction]) -> Vec<DaySummary> {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    let mut last_known_stock = Decimal::ZERO;

    for tx in sorted_by_day(history) {
        let bucket = days.entry(tx.date).or_insert_with(|| DayBucket {
            opening_stock: last_known_stock,
            closing_stock: last_known_stock,
            transactions: Vec::new(),
        });
        bucket.transactions.push(tx);
        // Every transaction advances the carry, so the bucket ends up holding
        // the stock_after of the day's last record.
        bucket.closing_stock = tx.stock_after;
        last_known_stock = tx.stock_after;
        log::debug!(
            "day {}: {} amount={} stock_after={}",
            tx.date,
            tx.kind,
            tx.amount,
            tx.stock_after
        );
    }

    days.into_iter()
        .map(|(date, bucket)| {
            let first_incoming = bucket
                .transactions
                .iter()
                .find(|tx| tx.kind.is_incoming())
                .map_or(Decimal::ZERO, |tx| tx.amount);
            let last_outgoing = bucket
                .transactions
                .iter()
                .rev()
                .find(|tx| tx.kind.is_outgoing())
                .map_or(Decimal::ZERO, |tx| tx.amount);
            DaySummary {
                date,
                opening_stock: bucket.opening_stock,
                first_incoming,
                last_outgoing,
                closing_stock: bucket.closing_stock,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::TransactionKind;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        crate::core::ledger::parse_wire_date(s).unwrap()
    }

    fn tx(date_s: &str, kind: TransactionKind, amount: Decimal, stock_after: Decimal) -> Transaction {
        Transaction {
            date: date(date_s),
            kind,
            amount,
            stock_after,
            sequence: None,
        }
    }

    #[test]
    fn first_incoming_and_last_outgoing_selection() {
        let history = vec![
            tx("05/03/2024", TransactionKind::AddStock, dec!(50), dec!(150)),
            tx("05/03/2024", TransactionKind::Usage, dec!(20), dec!(130)),
            tx("05/03/2024", TransactionKind::Usage, dec!(10), dec!(120)),
        ];
        let days = aggregate_daily(&history);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].first_incoming, dec!(50));
        assert_eq!(days[0].last_outgoing, dec!(10));
        assert_eq!(days[0].closing_stock, dec!(120));
    }

    #[test]
    fn opening_stock_of_first_day_is_zero() {
        let history = vec![tx(
            "01/03/2024",
            TransactionKind::InitialStock,
            dec!(100),
            dec!(100),
        )];
        let days = aggregate_daily(&history);
        assert_eq!(days[0].opening_stock, dec!(0));
        assert_eq!(days[0].closing_stock, dec!(100));
    }

    #[test]
    fn closing_stock_carries_into_next_day_opening() {
        let history = vec![
            tx("01/03/2024", TransactionKind::InitialStock, dec!(100), dec!(100)),
            tx("03/03/2024", TransactionKind::Usage, dec!(40), dec!(60)),
            tx("07/03/2024", TransactionKind::AddStock, dec!(50), dec!(110)),
            tx("07/03/2024", TransactionKind::Usage, dec!(30), dec!(80)),
        ];
        let days = aggregate_daily(&history);
        assert_eq!(days.len(), 3);
        for pair in days.windows(2) {
            assert_eq!(pair[0].closing_stock, pair[1].opening_stock);
        }
        assert_eq!(days[2].opening_stock, dec!(60));
        assert_eq!(days[2].closing_stock, dec!(80));
    }

    #[test]
    fn day_with_no_outgoing_reports_zero() {
        let history = vec![tx(
            "01/03/2024",
            TransactionKind::InitialStock,
            dec!(100),
            dec!(100),
        )];
        let days = aggregate_daily(&history);
        assert_eq!(days[0].last_outgoing, dec!(0));
        assert_eq!(days[0].first_incoming, dec!(100));
    }

    #[test]
    fn unsorted_input_is_ordered_by_date() {
        let history = vec![
            tx("07/03/2024", TransactionKind::Usage, dec!(30), dec!(70)),
            tx("01/03/2024", TransactionKind::InitialStock, dec!(100), dec!(100)),
        ];
        let days = aggregate_daily(&history);
        assert_eq!(days[0].date, date("01/03/2024"));
        assert_eq!(days[1].date, date("07/03/2024"));
        assert_eq!(days[1].opening_stock, dec!(100));
        assert_eq!(days[1].closing_stock, dec!(70));
    }

    #[test]
    fn same_day_ties_keep_recorded_order() {
        // Both records on the same day without sequence numbers: the second
        // recorded Usage must win the last-outgoing scan.
        let history = vec![
            tx("05/03/2024", TransactionKind::Usage, dec!(20), dec!(80)),
            tx("05/03/2024", TransactionKind::Usage, dec!(5), dec!(75)),
        ];
        let days = aggregate_daily(&history);
        assert_eq!(days[0].last_outgoing, dec!(5));
        assert_eq!(days[0].closing_stock, dec!(75));
    }

    #[test]
    fn explicit_sequence_overrides_recorded_order() {
        let mut a = tx("05/03/2024", TransactionKind::Usage, dec!(5), dec!(75));
        a.sequence = Some(2);
        let mut b = tx("05/03/2024", TransactionKind::Usage, dec!(20), dec!(95));
        b.sequence = Some(1);
        let days = aggregate_daily(&[a, b]);
        // Sequence 2 is processed last despite being recorded first.
        assert_eq!(days[0].last_outgoing, dec!(5));
        assert_eq!(days[0].closing_stock, dec!(75));
    }

    #[test]
    fn unknown_kind_shifts_closing_but_not_movements() {
        let history = vec![
            tx("05/03/2024", TransactionKind::AddStock, dec!(50), dec!(150)),
            tx(
                "05/03/2024",
                TransactionKind::Other("Koreksi".to_string()),
                dec!(7),
                dec!(143),
            ),
        ];
        let days = aggregate_daily(&history);
        assert_eq!(days[0].first_incoming, dec!(50));
        assert_eq!(days[0].last_outgoing, dec!(0));
        assert_eq!(days[0].closing_stock, dec!(143));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let history = vec![
            tx("01/03/2024", TransactionKind::InitialStock, dec!(100), dec!(100)),
            tx("05/03/2024", TransactionKind::AddStock, dec!(50), dec!(150)),
            tx("05/03/2024", TransactionKind::Usage, dec!(20), dec!(130)),
        ];
        assert_eq!(aggregate_daily(&history), aggregate_daily(&history));
    }

    #[test]
    fn empty_history_produces_no_days() {
        assert!(aggregate_daily(&[]).is_empty());
    }
}
