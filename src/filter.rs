// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Text and date-range filtering over transaction lists.

use crate::models::{DateRange, Transaction};

/// Returns the transactions matching `query` and falling inside `range`, in input order.
///
/// An empty query matches everything. Each range bound is applied on its own, so a
/// start after the end simply matches nothing rather than being rejected.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    query: &str,
    range: &DateRange,
) -> Vec<&'a Transaction> {
    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|t| matches_query(t, &needle) && within_range(t, range))
        .collect()
}

/// `needle` must already be lower-cased.
pub fn matches_query(t: &Transaction, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if t.label.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(amount) = t.amount {
        if amount.normalize().to_string().contains(needle) {
            return true;
        }
    }
    t.description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(needle))
}

pub fn within_range(t: &Transaction, range: &DateRange) -> bool {
    if range.is_unbounded() {
        return true;
    }
    match t.date {
        Some(d) => range.contains(d),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn tx(label: &str, amount: i64, date: &str, desc: Option<&str>) -> Transaction {
        Transaction {
            id: label.to_string(),
            kind: TransactionKind::Expense,
            amount: Some(Decimal::new(amount, 0)),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            label: label.to_string(),
            icon: String::new(),
            description: desc.map(str::to_string),
        }
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let txs = vec![
            tx("Groceries", 40, "2024-03-01", None),
            tx("Travel", 125, "2024-03-02", Some("Train to PUNE")),
            tx("Rent", 900, "2024-03-03", None),
        ];
        let all = DateRange::ALL;
        assert_eq!(filter_transactions(&txs, "GROC", &all).len(), 1);
        assert_eq!(filter_transactions(&txs, "pune", &all)[0].label, "Travel");
        assert_eq!(filter_transactions(&txs, "12", &all)[0].label, "Travel");
        assert!(filter_transactions(&txs, "zzz", &all).is_empty());
    }

    #[test]
    fn undated_rows_only_fail_when_a_bound_is_set() {
        let mut odd = tx("Misc", 5, "2024-03-01", None);
        odd.date = None;
        let txs = vec![odd];
        assert_eq!(filter_transactions(&txs, "", &DateRange::ALL).len(), 1);
        let bounded = DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        assert!(filter_transactions(&txs, "", &bounded).is_empty());
    }

    #[test]
    fn missing_amount_never_matches_amount_clause() {
        let mut odd = tx("Misc", 5, "2024-03-01", None);
        odd.amount = None;
        let txs = vec![odd];
        assert!(filter_transactions(&txs, "5", &DateRange::ALL).is_empty());
    }
}
