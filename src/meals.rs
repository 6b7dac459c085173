// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::MonthCursor;
use crate::models::{MealRecord, MealSummary, NonVeg};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Price of one vegetarian meal, used when the server omits cost figures.
pub const VEG_MEAL_COST: i64 = 60;

pub const PENDING_ID: &str = "pending";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealUpdate {
    Morning(bool),
    Evening(bool),
    NonVeg(NonVeg),
}

impl MealUpdate {
    pub fn field(&self) -> &'static str {
        match self {
            MealUpdate::Morning(_) => "morning",
            MealUpdate::Evening(_) => "evening",
            MealUpdate::NonVeg(_) => "nonVeg",
        }
    }

    /// Short human message for the change ("Morning meal taken", ...).
    pub fn describe(&self, previous: &NonVeg) -> Vec<String> {
        match self {
            MealUpdate::Morning(v) => vec![format!("Morning meal {}", taken(*v))],
            MealUpdate::Evening(v) => vec![format!("Evening meal {}", taken(*v))],
            MealUpdate::NonVeg(next) => {
                let diff = diff_non_veg(previous, next);
                let mut out = Vec::new();
                if !diff.added.is_empty() {
                    out.push(format!("Added: {}", diff.added.join(", ")));
                }
                if !diff.removed.is_empty() {
                    out.push(format!("Removed: {}", diff.removed.join(", ")));
                }
                out
            }
        }
    }
}

fn taken(v: bool) -> &'static str {
    if v { "taken" } else { "missed" }
}

/// Applies an acknowledged update to the local list, matching by calendar day.
/// Days without a record get a new all-false record carrying the change.
pub fn apply_update(meals: &mut Vec<MealRecord>, date: NaiveDate, update: &MealUpdate) {
    let idx = meals.iter().position(|m| m.date == Some(date));
    let record = match idx {
        Some(i) => &mut meals[i],
        None => {
            meals.push(MealRecord {
                id: PENDING_ID.to_string(),
                date: Some(date),
                morning: false,
                evening: false,
                non_veg: NonVeg::default(),
            });
            let last = meals.len() - 1;
            &mut meals[last]
        }
    };
    match update {
        MealUpdate::Morning(v) => record.morning = *v,
        MealUpdate::Evening(v) => record.evening = *v,
        MealUpdate::NonVeg(nv) => record.non_veg = nv.clone(),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct NonVegDiff {
    pub added: Vec<&'static str>,
    pub removed: Vec<&'static str>,
}

pub fn diff_non_veg(prev: &NonVeg, next: &NonVeg) -> NonVegDiff {
    let mut diff = NonVegDiff::default();
    let flags = [
        ("Omelette", prev.omelette, next.omelette),
        ("Egg Curry", prev.egg_curry, next.egg_curry),
        ("Chicken", prev.chicken, next.chicken),
    ];
    for (name, before, after) in flags {
        if before != after {
            if after {
                diff.added.push(name);
            } else {
                diff.removed.push(name);
            }
        }
    }
    if prev.other != next.other {
        if next.other.trim().is_empty() {
            diff.removed.push("Other items");
        } else {
            diff.added.push("Other items");
        }
    }
    diff
}

pub fn veg_cost(morning: u32, evening: u32) -> Decimal {
    Decimal::from(u64::from(morning) + u64::from(evening)) * Decimal::from(VEG_MEAL_COST)
}

/// Summary computed from the local records of one month.
pub fn summarize(meals: &[MealRecord], cursor: MonthCursor) -> MealSummary {
    let in_month = meals.iter().filter(|m| {
        m.date
            .is_some_and(|d| MonthCursor::containing(d) == cursor)
    });
    let (mut morning, mut evening) = (0u32, 0u32);
    for m in in_month {
        morning += u32::from(m.morning);
        evening += u32::from(m.evening);
    }
    let total_meals = morning + evening;
    let total_possible = cursor.days_in_month() * 2;
    let percentage = if total_possible == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(total_meals) * Decimal::from(100) / Decimal::from(total_possible))
            .round_dp(0)
    };
    let veg = veg_cost(morning, evening);
    MealSummary {
        morning_count: morning,
        evening_count: evening,
        total_meals,
        total_possible,
        percentage,
        veg_cost: veg,
        non_veg_cost: Decimal::ZERO,
        total_cost: veg,
    }
}

pub fn download_filename(cursor: MonthCursor) -> String {
    format!("meal_attendance_{}_{}.xlsx", cursor.name(), cursor.year())
}
