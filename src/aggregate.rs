// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart data: grouping transactions into summed buckets.

use crate::models::{ChartBucket, ChartPoint, Transaction};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub const OTHER_KEY: &str = "Other";
pub const UNDATED_KEY: &str = "Undated";

/// Groups by `key`, summing amounts. Buckets come out in first-seen key order.
pub fn group_by<'a, I, F>(transactions: I, key: F) -> Vec<ChartBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&Transaction) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<ChartBucket> = Vec::new();
    for t in transactions {
        let k = key(t);
        let amount = t.amount_or_zero();
        match index.get(&k) {
            Some(&i) => buckets[i].amount = add_amounts(buckets[i].amount, amount),
            None => {
                index.insert(k.clone(), buckets.len());
                buckets.push(ChartBucket { key: k, amount });
            }
        }
    }
    buckets
}

/// Label-keyed buckets: categories for expenses, sources for income.
pub fn by_label<'a, I>(transactions: I) -> Vec<ChartBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    group_by(transactions, |t| {
        let label = t.label.trim();
        if label.is_empty() {
            OTHER_KEY.to_string()
        } else {
            label.to_string()
        }
    })
}

/// Month buckets in chronological order; undated records are collected last.
pub fn by_month<'a, I>(transactions: I) -> Vec<ChartBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let sorted = sorted_by_date(transactions);
    group_by(sorted, |t| match t.date {
        Some(d) => month_label(d),
        None => UNDATED_KEY.to_string(),
    })
}

/// One point per transaction, sorted by date, labelled like "5th Mar".
pub fn daily_points<'a, I>(transactions: I) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    sorted_by_date(transactions)
        .into_iter()
        .map(|t| ChartPoint {
            label: t.date.map(day_label).unwrap_or_else(|| UNDATED_KEY.into()),
            key: t.label.clone(),
            amount: t.amount_or_zero(),
        })
        .collect()
}

pub fn total<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(Transaction::amount_or_zero)
        .fold(Decimal::ZERO, add_amounts)
}

/// `a + b`, clamped to `Decimal::MAX`/`Decimal::MIN` when the sum is out of range.
pub fn add_amounts(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "amount sum out of range, clamping");
        if b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

fn sorted_by_date<'a, I>(transactions: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut v: Vec<&Transaction> = transactions.into_iter().collect();
    // stable: equal dates keep their input order
    v.sort_by_key(|t| (t.date.is_none(), t.date));
    v
}

pub fn month_label(d: NaiveDate) -> String {
    d.format("%b %Y").to_string()
}

pub fn day_label(d: NaiveDate) -> String {
    format!("{}{} {}", d.day(), ordinal_suffix(d.day()), d.format("%b"))
}

fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        assert_eq!(day_label(d(1)), "1st Mar");
        assert_eq!(day_label(d(2)), "2nd Mar");
        assert_eq!(day_label(d(3)), "3rd Mar");
        assert_eq!(day_label(d(11)), "11th Mar");
        assert_eq!(day_label(d(13)), "13th Mar");
        assert_eq!(day_label(d(22)), "22nd Mar");
        assert_eq!(day_label(d(31)), "31st Mar");
    }

    #[test]
    fn month_label_is_short_month_and_year() {
        assert_eq!(
            month_label(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
            "Feb 2024"
        );
    }
}
