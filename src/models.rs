// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Name of the label field for this kind ("Source" for income, "Category" for expenses).
    pub const fn label_name(self) -> &'static str {
        match self {
            Self::Income => "Source",
            Self::Expense => "Category",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical income or expense record.
///
/// `amount` and `date` are `None` when the server sent something unparseable; core
/// functions treat those as zero / non-matching instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub label: String,
    pub icon: String,
    pub description: Option<String>,
}

impl Transaction {
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonVeg {
    pub omelette: bool,
    pub egg_curry: bool,
    pub chicken: bool,
    pub other: String,
}

impl NonVeg {
    pub fn any(&self) -> bool {
        self.omelette || self.egg_curry || self.chicken || !self.other.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub morning: bool,
    pub evening: bool,
    pub non_veg: NonVeg,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBucket {
    pub key: String,
    pub amount: Decimal,
}

/// One point of a per-transaction line series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub key: String,
    pub amount: Decimal,
}

/// Inclusive window over calendar dates. A `None` bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub const ALL: DateRange = DateRange {
        start: None,
        end: None,
    };

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_balance: Decimal,
}

impl DashboardSummary {
    pub fn balance(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expenses)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionWindow {
    pub total: Decimal,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub recent: Vec<Transaction>,
    pub last_30_days_expenses: TransactionWindow,
    pub last_60_days_income: TransactionWindow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealSummary {
    pub morning_count: u32,
    pub evening_count: u32,
    pub total_meals: u32,
    pub total_possible: u32,
    pub percentage: Decimal,
    pub veg_cost: Decimal,
    pub non_veg_cost: Decimal,
    pub total_cost: Decimal,
}
