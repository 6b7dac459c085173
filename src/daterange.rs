// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Named date-range presets and the picker that selects between them.

use crate::models::DateRange;
use anyhow::{Result, anyhow};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Preset {
    All,
    Last15,
    Last25,
    ThisMonth,
    ThisYear,
    Custom,
}

impl Preset {
    pub const ALL_PRESETS: [Preset; 6] = [
        Preset::All,
        Preset::Last15,
        Preset::Last25,
        Preset::ThisMonth,
        Preset::ThisYear,
        Preset::Custom,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Last15 => "last15",
            Self::Last25 => "last25",
            Self::ThisMonth => "thisMonth",
            Self::ThisYear => "thisYear",
            Self::Custom => "custom",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Transactions",
            Self::Last15 => "Last 15 Days",
            Self::Last25 => "Last 25 Days",
            Self::ThisMonth => "This Month",
            Self::ThisYear => "This Year",
            Self::Custom => "Custom Range",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Preset::ALL_PRESETS
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                anyhow!(
                    "Unknown range '{}' (use all|last15|last25|thisMonth|thisYear|custom)",
                    s
                )
            })
    }
}

/// Concrete range for a non-custom preset anchored on `today`.
/// `Custom` resolves to `None`; use [`resolve_custom`] for it.
pub fn resolve(preset: Preset, today: NaiveDate) -> Option<DateRange> {
    let range = match preset {
        Preset::All => DateRange::ALL,
        Preset::Last15 => rolling(today, 15),
        Preset::Last25 => rolling(today, 25),
        Preset::ThisMonth => {
            let start = today.with_day(1)?;
            let end = last_day_of_month(today.year(), today.month())?;
            DateRange::new(Some(start), Some(end))
        }
        Preset::ThisYear => DateRange::new(
            NaiveDate::from_ymd_opt(today.year(), 1, 1),
            NaiveDate::from_ymd_opt(today.year(), 12, 31),
        ),
        Preset::Custom => return None,
    };
    Some(range)
}

/// A custom range is only accepted with both bounds present.
pub fn resolve_custom(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<DateRange> {
    match (start, end) {
        (Some(s), Some(e)) => Some(DateRange::new(Some(s), Some(e))),
        _ => None,
    }
}

fn rolling(today: NaiveDate, days: i64) -> DateRange {
    DateRange::new(Some(today - Duration::days(days)), Some(today))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

pub fn display_date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// "from Mar 5, 2024 to Mar 20, 2024"; open ends read "all time" / "present".
pub fn describe(range: &DateRange) -> String {
    let from = range
        .start
        .map(display_date)
        .unwrap_or_else(|| "all time".to_string());
    let to = range
        .end
        .map(display_date)
        .unwrap_or_else(|| "present".to_string());
    format!("from {} to {}", from, to)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PickerState {
    Closed,
    Open,
    AwaitingCustomBounds,
}

/// Dropdown-style range picker.
///
/// Every method that can change the active range returns the newly emitted range;
/// `None` means the active range is untouched.
#[derive(Debug, Clone)]
pub struct DateRangePicker {
    state: PickerState,
    selected: Preset,
    custom_start: Option<NaiveDate>,
    custom_end: Option<NaiveDate>,
    active: DateRange,
    label: String,
}

impl DateRangePicker {
    /// Starts closed on "All Transactions" with the custom end pre-filled to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: PickerState::Closed,
            selected: Preset::All,
            custom_start: None,
            custom_end: Some(today),
            active: DateRange::ALL,
            label: Preset::All.label().to_string(),
        }
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn selected(&self) -> Preset {
        self.selected
    }

    pub fn active(&self) -> DateRange {
        self.active
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn trigger(&mut self) {
        self.state = match self.state {
            PickerState::Closed => PickerState::Open,
            PickerState::Open | PickerState::AwaitingCustomBounds => PickerState::Closed,
        };
    }

    pub fn click_outside(&mut self) {
        self.state = PickerState::Closed;
    }

    pub fn choose(&mut self, preset: Preset, today: NaiveDate) -> Option<DateRange> {
        if self.state == PickerState::Closed {
            return None;
        }
        self.selected = preset;
        if preset == Preset::Custom {
            self.state = PickerState::AwaitingCustomBounds;
            return self.emit_custom();
        }
        self.state = PickerState::Closed;
        let range = resolve(preset, today)?;
        self.label = preset.label().to_string();
        self.active = range;
        Some(range)
    }

    pub fn set_custom_start(&mut self, start: Option<NaiveDate>) -> Option<DateRange> {
        self.custom_start = start;
        self.custom_edit()
    }

    pub fn set_custom_end(&mut self, end: Option<NaiveDate>) -> Option<DateRange> {
        self.custom_end = end;
        self.custom_edit()
    }

    /// Closes the picker when both custom bounds are set.
    pub fn apply(&mut self) -> Option<DateRange> {
        if self.state != PickerState::AwaitingCustomBounds {
            return None;
        }
        let range = self.emit_custom()?;
        self.state = PickerState::Closed;
        Some(range)
    }

    fn custom_edit(&mut self) -> Option<DateRange> {
        if self.state != PickerState::AwaitingCustomBounds {
            return None;
        }
        self.emit_custom()
    }

    fn emit_custom(&mut self) -> Option<DateRange> {
        let range = resolve_custom(self.custom_start, self.custom_end)?;
        if let (Some(s), Some(e)) = (range.start, range.end) {
            self.label = format!("{} - {}", display_date(s), display_date(e));
        }
        self.active = range;
        Some(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_preset_ids_case_insensitively() {
        assert_eq!("thismonth".parse::<Preset>().unwrap(), Preset::ThisMonth);
        assert_eq!(" last15 ".parse::<Preset>().unwrap(), Preset::Last15);
        assert!("fortnight".parse::<Preset>().is_err());
    }

    #[test]
    fn december_month_end_rolls_year() {
        let r = resolve(Preset::ThisMonth, d(2023, 12, 9)).unwrap();
        assert_eq!(r.end, Some(d(2023, 12, 31)));
    }

    #[test]
    fn describe_open_ends() {
        assert_eq!(describe(&DateRange::ALL), "from all time to present");
        let r = DateRange::new(Some(d(2024, 3, 5)), None);
        assert_eq!(describe(&r), "from Mar 5, 2024 to present");
    }
}
