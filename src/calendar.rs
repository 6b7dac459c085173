// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month grid layout for the meal-attendance calendar.

use crate::models::{MealRecord, NonVeg};
use anyhow::{Result, anyhow};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A validated (month, year) pair. Months are 1-based.
///
/// Only months whose first day chrono can represent are constructible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    month: u32,
    year: i32,
    #[serde(skip)]
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month {}, expected 1-12", month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow!("Invalid year {}", year))?;
        Ok(Self { month, year, first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Previous month, `None` past the earliest representable date.
    pub fn prev(self) -> Option<Self> {
        match self.month {
            1 => Self::new(12, self.year.checked_sub(1)?).ok(),
            m => Self::new(m - 1, self.year).ok(),
        }
    }

    /// Next month, `None` past the latest representable date.
    pub fn next(self) -> Option<Self> {
        match self.month {
            12 => Self::new(1, self.year.checked_add(1)?).ok(),
            m => Self::new(m + 1, self.year).ok(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Weekday index of day 1, Sunday = 0.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }

    /// "Mar 2024"
    pub fn short_label(&self) -> String {
        format!("{} {}", short_month_name(self.month), self.year)
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

pub fn short_month_name(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MealStatus {
    pub morning: bool,
    pub evening: bool,
    pub non_veg: NonVeg,
}

impl MealStatus {
    fn from_record(r: &MealRecord) -> Self {
        Self {
            morning: r.morning,
            evening: r.evening,
            non_veg: r.non_veg.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalendarCell {
    Blank,
    Day {
        day: u32,
        date: String,
        is_today: bool,
        status: MealStatus,
    },
}

impl CalendarCell {
    pub fn status(&self) -> Option<&MealStatus> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day { status, .. } => Some(status),
        }
    }
}

/// Resolves the meal status for `date`, matching records by calendar day.
pub fn status_for(meals: &[MealRecord], date: NaiveDate) -> MealStatus {
    meals
        .iter()
        .find(|m| m.date == Some(date))
        .map(MealStatus::from_record)
        .unwrap_or_default()
}

/// Leading blanks followed by one cell per day of the month.
pub fn build_grid(
    cursor: MonthCursor,
    meals: &[MealRecord],
    today: Option<NaiveDate>,
) -> Vec<CalendarCell> {
    let blanks = cursor.leading_blanks();
    let days = cursor.days_in_month();
    let mut cells = Vec::with_capacity((blanks + days) as usize);
    cells.extend((0..blanks).map(|_| CalendarCell::Blank));
    for day in 1..=days {
        let Some(date) = NaiveDate::from_ymd_opt(cursor.year(), cursor.month(), day) else {
            continue;
        };
        cells.push(CalendarCell::Day {
            day,
            date: date.format("%Y-%m-%d").to_string(),
            is_today: today == Some(date),
            status: status_for(meals, date),
        });
    }
    cells
}

/// Plain-text month view, one row per week. `M`/`E` mark attended meals, `N` non-veg.
pub fn render_grid(cursor: MonthCursor, cells: &[CalendarCell]) -> String {
    let mut out = format!("{} {}\n", cursor.name(), cursor.year());
    out.push_str(
        &WEEKDAY_HEADERS
            .iter()
            .map(|h| format!("{:<8}", h))
            .collect::<String>(),
    );
    out.push('\n');
    for week in cells.chunks(7) {
        let line: String = week
            .iter()
            .map(|c| match c {
                CalendarCell::Blank => format!("{:<8}", ""),
                CalendarCell::Day {
                    day,
                    is_today,
                    status,
                    ..
                } => {
                    let marks = format!(
                        "{}{}{}",
                        if status.morning { 'M' } else { '.' },
                        if status.evening { 'E' } else { '.' },
                        if status.non_veg.any() { 'N' } else { '.' },
                    );
                    let day = if *is_today {
                        format!("[{}]", day)
                    } else {
                        day.to_string()
                    };
                    format!("{:<8}", format!("{} {}", day, marks))
                }
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
