// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expenses::api::wire::{
    NewTransaction, dashboard_from, meal_summary_from, meal_update_json, meals_from,
    mixed_transactions_from, transactions_from, user_from,
};
use expenses::meals::MealUpdate;
use expenses::models::{NonVeg, TransactionKind};
use rust_decimal::Decimal;
use serde_json::json;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn expense_label_prefers_category() {
    let value = json!([
        {
            "_id": "a1",
            "category": "Food",
            "title": "Lunch",
            "amount": 120,
            "date": "2024-03-05T00:00:00.000Z"
        },
        { "_id": "a2", "title": "Taxi", "amount": "45.50", "date": "2024-03-06" },
    ]);
    let list = transactions_from(value, TransactionKind::Expense);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].label, "Food");
    assert_eq!(list[0].date, Some(d(2024, 3, 5)));
    assert_eq!(list[0].amount, Some(Decimal::from(120)));
    assert_eq!(list[1].label, "Taxi");
    assert_eq!(list[1].amount, Some(Decimal::new(4550, 2)));
    assert!(list.iter().all(|t| t.kind == TransactionKind::Expense));
}

#[test]
fn income_label_prefers_title_then_source() {
    let value = json!([
        {
            "_id": "i1",
            "title": "Salary",
            "source": "Employer",
            "amount": 5000,
            "date": "2024-03-01"
        },
        { "_id": "i2", "source": "Bank", "amount": 12, "date": "2024-03-02" },
    ]);
    let list = transactions_from(value, TransactionKind::Income);
    assert_eq!(list[0].label, "Salary");
    assert_eq!(list[1].label, "Bank");
}

#[test]
fn malformed_fields_degrade_instead_of_failing() {
    let value = json!([
        {
            "_id": 7,
            "category": "Food",
            "amount": "twelve",
            "date": "yesterday",
            "description": "  "
        },
        { "category": "Rent" },
    ]);
    let list = transactions_from(value, TransactionKind::Expense);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, "7");
    assert_eq!(list[0].amount, None);
    assert_eq!(list[0].date, None);
    assert_eq!(list[0].description, None);
    assert_eq!(list[1].amount_or_zero(), Decimal::ZERO);
}

#[test]
fn non_array_payloads_yield_empty_lists() {
    assert!(transactions_from(json!({ "message": "oops" }), TransactionKind::Income).is_empty());
    assert!(transactions_from(json!(null), TransactionKind::Expense).is_empty());
    assert!(meals_from(json!("nope")).is_empty());
}

#[test]
fn mixed_lists_infer_kind_per_record() {
    let list = mixed_transactions_from(json!([
        { "_id": "1", "type": "income", "source": "Salary", "amount": 10 },
        { "_id": "2", "category": "Food", "amount": 3 },
        { "_id": "3", "title": "Bonus", "amount": 4 },
    ]));
    let kinds: Vec<_> = list.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TransactionKind::Income, TransactionKind::Expense, TransactionKind::Income]
    );
}

#[test]
fn user_accepts_wrapped_and_bare_objects() {
    let wrapped = user_from(json!({
        "user": { "_id": "u1", "fullName": "Ana", "email": "ana@x.io" }
    }));
    let bare = user_from(json!({ "id": "u1", "fullName": "Ana", "email": "ana@x.io" }));
    assert_eq!(wrapped, bare);
    let u = wrapped.unwrap();
    assert_eq!(u.full_name, "Ana");
    assert_eq!(u.profile_image_url, None);
    assert!(user_from(json!("ana")).is_none());
}

#[test]
fn meal_records_normalize_non_veg() {
    let meals = meals_from(json!([
        {
            "_id": "m1",
            "date": "2024-02-03T00:00:00Z",
            "morning": true,
            "nonVeg": { "eggCurry": true, "other": "Fish" }
        },
        { "_id": "m2", "date": "2024-02-04" },
    ]));
    assert_eq!(meals[0].date, Some(d(2024, 2, 3)));
    assert!(meals[0].morning && !meals[0].evening);
    assert!(meals[0].non_veg.egg_curry && !meals[0].non_veg.chicken);
    assert_eq!(meals[0].non_veg.other, "Fish");
    assert!(!meals[1].non_veg.any());
}

#[test]
fn meal_summary_costs_fall_back_to_veg_price() {
    let s = meal_summary_from(json!({
        "morningCount": 10, "eveningCount": "5", "totalPossible": 58, "percentage": 26
    }))
    .unwrap();
    assert_eq!(s.total_meals, 15);
    assert_eq!(s.veg_cost, Decimal::from(900));
    assert_eq!(s.non_veg_cost, Decimal::ZERO);
    assert_eq!(s.total_cost, Decimal::from(900));
    assert!(meal_summary_from(json!(null)).is_none());
}

#[test]
fn dashboard_reads_nested_windows() {
    let data = dashboard_from(json!({
        "summary": { "totalIncome": 1000, "totalExpenses": "400" },
        "recentTransactions": [
            {
                "_id": "r1",
                "type": "expense",
                "category": "Food",
                "amount": 40,
                "date": "2024-03-04"
            }
        ],
        "last30DaysExpenses": {
            "transactions": [
                { "_id": "e1", "category": "Food", "amount": 40, "date": "2024-03-04" },
                { "_id": "e2", "category": "Bus", "amount": 10, "date": "2024-03-05" }
            ]
        },
        "last60Days": { "income": { "total": 1000, "transactions": [] } }
    }));
    assert_eq!(data.summary.total_balance, Decimal::from(600));
    assert_eq!(data.recent.len(), 1);
    assert_eq!(data.last_30_days_expenses.total, Decimal::from(50));
    assert_eq!(data.last_30_days_expenses.transactions[1].label, "Bus");
    assert_eq!(data.last_60_days_income.total, Decimal::from(1000));

    let empty = dashboard_from(json!(null));
    assert_eq!(empty.summary.total_income, Decimal::ZERO);
    assert!(empty.recent.is_empty());
}

#[test]
fn new_transaction_uses_kind_specific_label_field() {
    let tx = NewTransaction {
        label: "Salary".into(),
        amount: Decimal::new(150050, 2),
        date: d(2024, 3, 1),
        icon: String::new(),
        description: None,
    };
    let income = tx.to_json(TransactionKind::Income);
    assert_eq!(income["title"], "Salary");
    assert_eq!(income["date"], "2024-03-01");
    assert_eq!(income["amount"].as_f64(), Some(1500.5));
    let expense = tx.to_json(TransactionKind::Expense);
    assert_eq!(expense["category"], "Salary");
    assert!(expense.get("title").is_none());
}

#[test]
fn meal_update_body_names_the_field() {
    let body = meal_update_json(d(2024, 3, 9), &MealUpdate::Evening(true));
    assert_eq!(body, json!({ "date": "2024-03-09", "evening": true }));

    let nv = NonVeg {
        chicken: true,
        ..Default::default()
    };
    let body = meal_update_json(d(2024, 3, 9), &MealUpdate::NonVeg(nv));
    assert_eq!(body["nonVeg"]["chicken"], true);
}
