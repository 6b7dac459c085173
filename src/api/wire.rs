// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wire shapes of the HTTP API and their normalization into domain types.
//!
//! Field guessing (category vs title vs source, numbers sent as strings, timestamps vs
//! plain dates) stays in this module.

use crate::meals::{MealUpdate, veg_cost};
use crate::models::{
    DashboardData, DashboardSummary, MealRecord, MealSummary, NonVeg, Transaction,
    TransactionKind, TransactionWindow, User,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Deserialize;
use serde_json::{Value, json};

/// Reads a decimal from a JSON number or numeric string.
pub fn parse_amount(v: &Value) -> Option<Decimal> {
    match v {
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

/// Calendar date from `YYYY-MM-DD` or an ISO timestamp; the date part is taken as written.
pub fn parse_wire_date(s: &str) -> Option<NaiveDate> {
    let head = s.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn id_string(v: &Option<Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn first_non_blank(candidates: [&Option<String>; 3]) -> String {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn count(v: &Value) -> Option<u32> {
    v.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .or_else(|| parse_amount(v).and_then(|d| d.to_u32()))
}

#[derive(Debug, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl RawTransaction {
    /// Kind stated by the record itself, if any, otherwise guessed from its fields.
    pub fn infer_kind(&self, fallback: TransactionKind) -> TransactionKind {
        match self.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("income") => TransactionKind::Income,
            Some("expense") => TransactionKind::Expense,
            _ if self.category.is_some() => TransactionKind::Expense,
            _ if self.title.is_some() || self.source.is_some() => TransactionKind::Income,
            _ => fallback,
        }
    }

    pub fn normalize(self, kind: TransactionKind) -> Transaction {
        let label = match kind {
            TransactionKind::Expense => {
                first_non_blank([&self.category, &self.title, &self.source])
            }
            TransactionKind::Income => {
                first_non_blank([&self.title, &self.source, &self.category])
            }
        };
        Transaction {
            id: id_string(&self.id),
            kind,
            amount: parse_amount(&self.amount),
            date: self.date.as_deref().and_then(parse_wire_date),
            label,
            icon: self.icon.unwrap_or_default(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }
}

/// Anything that is not an array yields an empty list; unreadable elements are skipped.
pub fn transactions_from(value: Value, kind: TransactionKind) -> Vec<Transaction> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawTransaction>(item) {
            Ok(raw) => Some(raw.normalize(kind)),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable transaction");
                None
            }
        })
        .collect()
}

/// Mixed income/expense list; each record's kind is inferred.
pub fn mixed_transactions_from(value: Value) -> Vec<Transaction> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawTransaction>(item).ok())
        .map(|raw| {
            let kind = raw.infer_kind(TransactionKind::Expense);
            raw.normalize(kind)
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNonVeg {
    #[serde(default)]
    pub omelette: Option<bool>,
    #[serde(default)]
    pub egg_curry: Option<bool>,
    #[serde(default)]
    pub chicken: Option<bool>,
    #[serde(default)]
    pub other: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeal {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub morning: Option<bool>,
    #[serde(default)]
    pub evening: Option<bool>,
    #[serde(default)]
    pub non_veg: Option<RawNonVeg>,
}

impl RawMeal {
    pub fn normalize(self) -> MealRecord {
        let nv = self.non_veg.unwrap_or_default();
        MealRecord {
            id: id_string(&self.id),
            date: self.date.as_deref().and_then(parse_wire_date),
            morning: self.morning.unwrap_or(false),
            evening: self.evening.unwrap_or(false),
            non_veg: NonVeg {
                omelette: nv.omelette.unwrap_or(false),
                egg_curry: nv.egg_curry.unwrap_or(false),
                chicken: nv.chicken.unwrap_or(false),
                other: nv.other.unwrap_or_default(),
            },
        }
    }
}

pub fn meals_from(value: Value) -> Vec<MealRecord> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawMeal>(item).ok())
        .map(RawMeal::normalize)
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMealSummary {
    #[serde(default)]
    pub morning_count: Value,
    #[serde(default)]
    pub evening_count: Value,
    #[serde(default)]
    pub total_meals: Value,
    #[serde(default)]
    pub total_possible: Value,
    #[serde(default)]
    pub percentage: Value,
    #[serde(default)]
    pub veg_cost: Value,
    #[serde(default)]
    pub non_veg_cost: Value,
    #[serde(default)]
    pub total_cost: Value,
}

impl RawMealSummary {
    /// Missing costs fall back to the per-meal veg price and zero non-veg cost.
    pub fn normalize(self) -> MealSummary {
        let morning = count(&self.morning_count).unwrap_or(0);
        let evening = count(&self.evening_count).unwrap_or(0);
        let veg = parse_amount(&self.veg_cost).unwrap_or_else(|| veg_cost(morning, evening));
        let non_veg = parse_amount(&self.non_veg_cost).unwrap_or(Decimal::ZERO);
        MealSummary {
            morning_count: morning,
            evening_count: evening,
            total_meals: count(&self.total_meals).unwrap_or(morning.saturating_add(evening)),
            total_possible: count(&self.total_possible).unwrap_or(0),
            percentage: parse_amount(&self.percentage).unwrap_or(Decimal::ZERO),
            veg_cost: veg,
            non_veg_cost: non_veg,
            total_cost: parse_amount(&self.total_cost)
                .unwrap_or_else(|| crate::aggregate::add_amounts(veg, non_veg)),
        }
    }
}

pub fn meal_summary_from(value: Value) -> Option<MealSummary> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value::<RawMealSummary>(value)
        .ok()
        .map(RawMealSummary::normalize)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl RawUser {
    pub fn normalize(self) -> User {
        User {
            id: id_string(&self.id),
            full_name: self.full_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            profile_image_url: self.profile_image_url.filter(|s| !s.is_empty()),
        }
    }
}

/// Accepts both `{ "user": {...} }` and a bare user object.
pub fn user_from(value: Value) -> Option<User> {
    let inner = match value {
        Value::Object(mut map) if map.get("user").is_some_and(Value::is_object) => {
            map.remove("user")?
        }
        other => other,
    };
    if !inner.is_object() {
        return None;
    }
    serde_json::from_value::<RawUser>(inner)
        .ok()
        .map(RawUser::normalize)
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummary {
    #[serde(default)]
    total_income: Value,
    #[serde(default)]
    total_expenses: Value,
    #[serde(default)]
    total_balance: Value,
}

#[derive(Debug, Default, Deserialize)]
struct RawWindow {
    #[serde(default)]
    total: Value,
    #[serde(default)]
    transactions: Value,
}

#[derive(Debug, Default, Deserialize)]
struct RawLast60 {
    #[serde(default)]
    income: Option<RawWindow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDashboard {
    #[serde(default)]
    summary: Option<RawSummary>,
    #[serde(default)]
    recent_transactions: Value,
    #[serde(default)]
    last30_days_expenses: Option<RawWindow>,
    #[serde(default)]
    last60_days: Option<RawLast60>,
}

fn window_from(raw: Option<RawWindow>, kind: TransactionKind) -> TransactionWindow {
    let raw = raw.unwrap_or_default();
    let transactions = transactions_from(raw.transactions, kind);
    let total = parse_amount(&raw.total)
        .unwrap_or_else(|| crate::aggregate::total(&transactions));
    TransactionWindow {
        total,
        transactions,
    }
}

pub fn dashboard_from(value: Value) -> DashboardData {
    let raw: RawDashboard = serde_json::from_value(value).unwrap_or_default();
    let summary = raw.summary.unwrap_or_default();
    let total_income = parse_amount(&summary.total_income).unwrap_or(Decimal::ZERO);
    let total_expenses = parse_amount(&summary.total_expenses).unwrap_or(Decimal::ZERO);
    DashboardData {
        summary: DashboardSummary {
            total_income,
            total_expenses,
            total_balance: parse_amount(&summary.total_balance)
                .unwrap_or(total_income.saturating_sub(total_expenses)),
        },
        recent: mixed_transactions_from(raw.recent_transactions),
        last_30_days_expenses: window_from(raw.last30_days_expenses, TransactionKind::Expense),
        last_60_days_income: window_from(
            raw.last60_days.and_then(|l| l.income),
            TransactionKind::Income,
        ),
    }
}

/// Body for creating a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub icon: String,
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn to_json(&self, kind: TransactionKind) -> Value {
        let label_field = match kind {
            TransactionKind::Income => "title",
            TransactionKind::Expense => "category",
        };
        let amount = self
            .amount
            .to_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(self.amount.to_string()));
        let mut body = json!({
            "amount": amount,
            "date": self.date.format("%Y-%m-%d").to_string(),
            "icon": self.icon,
        });
        body[label_field] = Value::String(self.label.trim().to_string());
        if let Some(d) = &self.description {
            body["description"] = Value::String(d.trim().to_string());
        }
        body
    }
}

pub fn meal_update_json(date: NaiveDate, update: &MealUpdate) -> Value {
    let value = match update {
        MealUpdate::Morning(v) | MealUpdate::Evening(v) => Value::Bool(*v),
        MealUpdate::NonVeg(nv) => json!({
            "omelette": nv.omelette,
            "eggCurry": nv.egg_curry,
            "chicken": nv.chicken,
            "other": nv.other,
        }),
    };
    let mut body = json!({ "date": date.format("%Y-%m-%d").to_string() });
    body[update.field()] = value;
    body
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
