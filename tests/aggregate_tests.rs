// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expenses::aggregate::{by_label, by_month, daily_points, total};
use expenses::api::wire::{dashboard_from, transactions_from};
use expenses::models::{ChartBucket, Transaction, TransactionKind};
use expenses::utils::bar_chart;
use rust_decimal::Decimal;
use serde_json::json;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn tx(label: &str, amount: i64, date: Option<NaiveDate>) -> Transaction {
    Transaction {
        id: format!("{}-{}", label, amount),
        kind: TransactionKind::Expense,
        amount: Some(Decimal::from(amount)),
        date,
        label: label.to_string(),
        icon: String::new(),
        description: None,
    }
}

fn bucket(key: &str, amount: i64) -> ChartBucket {
    ChartBucket {
        key: key.to_string(),
        amount: Decimal::from(amount),
    }
}

#[test]
fn labels_sum_in_first_seen_order() {
    let list = vec![
        tx("Food", 100, Some(d(2024, 3, 1))),
        tx("Food", 50, Some(d(2024, 3, 2))),
        tx("Travel", 30, Some(d(2024, 3, 3))),
    ];
    assert_eq!(
        by_label(&list),
        vec![bucket("Food", 150), bucket("Travel", 30)]
    );
}

#[test]
fn blank_labels_collect_under_other() {
    let list = vec![tx("  ", 5, None), tx("", 7, None), tx("Rent", 1, None)];
    assert_eq!(by_label(&list), vec![bucket("Other", 12), bucket("Rent", 1)]);
}

#[test]
fn grouping_preserves_total() {
    let list = vec![
        tx("Food", 100, Some(d(2024, 1, 9))),
        tx("Bus", 13, Some(d(2023, 12, 30))),
        tx("Food", 7, None),
        tx("Gift", 250, Some(d(2024, 2, 1))),
    ];
    let expected = total(&list);
    let by_l: Decimal = by_label(&list).iter().map(|b| b.amount).sum();
    let by_m: Decimal = by_month(&list).iter().map(|b| b.amount).sum();
    assert_eq!(by_l, expected);
    assert_eq!(by_m, expected);
    assert_eq!(expected, Decimal::from(370));
}

#[test]
fn label_grouping_ignores_input_order() {
    let list = vec![
        tx("Food", 100, None),
        tx("Travel", 50, None),
        tx("Food", 20, None),
        tx("Bills", 9, None),
    ];
    let mut reversed = list.clone();
    reversed.reverse();

    let mut a = by_label(&list);
    let mut b = by_label(&reversed);
    a.sort_by(|x, y| x.key.cmp(&y.key));
    b.sort_by(|x, y| x.key.cmp(&y.key));
    assert_eq!(a, b);
}

#[test]
fn months_come_out_chronologically() {
    let list = vec![
        tx("A", 1, Some(d(2024, 3, 15))),
        tx("B", 2, Some(d(2024, 1, 2))),
        tx("C", 4, None),
        tx("D", 8, Some(d(2023, 12, 31))),
        tx("E", 16, Some(d(2024, 1, 28))),
    ];
    assert_eq!(
        by_month(&list),
        vec![
            bucket("Dec 2023", 8),
            bucket("Jan 2024", 18),
            bucket("Mar 2024", 1),
            bucket("Undated", 4),
        ]
    );
}

#[test]
fn unparseable_amounts_count_as_zero() {
    let mut broken = tx("Food", 0, Some(d(2024, 3, 1)));
    broken.amount = None;
    let list = vec![broken, tx("Food", 30, Some(d(2024, 3, 2)))];
    assert_eq!(by_label(&list), vec![bucket("Food", 30)]);
}

#[test]
fn daily_points_sorted_with_ordinal_labels() {
    let list = vec![
        tx("Taxi", 12, Some(d(2024, 3, 22))),
        tx("Lunch", 8, Some(d(2024, 3, 1))),
        tx("Snack", 3, Some(d(2024, 3, 12))),
    ];
    let points = daily_points(&list);
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["1st Mar", "12th Mar", "22nd Mar"]);
    assert_eq!(points[0].key, "Lunch");
    assert_eq!(points[2].amount, Decimal::from(12));
}

#[test]
fn sums_clamp_instead_of_overflowing() {
    let list = transactions_from(
        json!([
            {
                "_id": "a",
                "category": "Food",
                "amount": "79228162514264337593543950335",
                "date": "2024-03-01"
            },
            { "_id": "b", "category": "Food", "amount": "1", "date": "2024-03-02" },
        ]),
        TransactionKind::Expense,
    );
    assert_eq!(total(&list), Decimal::MAX);
    assert_eq!(
        by_label(&list),
        vec![ChartBucket {
            key: "Food".into(),
            amount: Decimal::MAX,
        }]
    );
    assert_eq!(by_month(&list)[0].amount, Decimal::MAX);

    let mut negative = list.clone();
    for t in &mut negative {
        t.amount = t.amount.map(|a| -a);
    }
    assert_eq!(total(&negative), Decimal::MIN);
}

#[test]
fn huge_buckets_still_chart() {
    let buckets = vec![
        bucket("Food", 10),
        ChartBucket {
            key: "Rent".into(),
            amount: Decimal::MAX,
        },
    ];
    let text = bar_chart(&buckets, 40);
    assert_eq!(text.lines().nth(1).unwrap().matches('█').count(), 40);
}

#[test]
fn dashboard_window_with_huge_amounts_does_not_panic() {
    let data = dashboard_from(json!({
        "summary": { "totalIncome": "79228162514264337593543950335", "totalExpenses": "-5" },
        "last30DaysExpenses": {
            "transactions": [
                { "category": "Food", "amount": "79228162514264337593543950335" },
                { "category": "Food", "amount": 2 }
            ]
        }
    }));
    assert_eq!(data.last_30_days_expenses.total, Decimal::MAX);
    assert_eq!(data.summary.total_balance, Decimal::MAX);
}
