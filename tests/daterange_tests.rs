// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expenses::cli;
use expenses::commands::transactions::picker_from_args;
use expenses::daterange::{DateRangePicker, PickerState, Preset, resolve};
use expenses::models::DateRange;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn range(a: NaiveDate, b: NaiveDate) -> DateRange {
    DateRange::new(Some(a), Some(b))
}

#[test]
fn rolling_presets_end_today() {
    let today = d(2024, 3, 20);
    assert_eq!(resolve(Preset::Last15, today), Some(range(d(2024, 3, 5), today)));
    assert_eq!(resolve(Preset::Last25, today), Some(range(d(2024, 2, 24), today)));
}

#[test]
fn calendar_presets_cover_whole_periods() {
    let today = d(2024, 2, 10);
    assert_eq!(
        resolve(Preset::ThisMonth, today),
        Some(range(d(2024, 2, 1), d(2024, 2, 29)))
    );
    assert_eq!(
        resolve(Preset::ThisYear, today),
        Some(range(d(2024, 1, 1), d(2024, 12, 31)))
    );
    assert_eq!(resolve(Preset::All, today), Some(DateRange::ALL));
    assert_eq!(resolve(Preset::Custom, today), None);
}

#[test]
fn picker_choose_closes_and_relabels() {
    let today = d(2024, 3, 20);
    let mut p = DateRangePicker::new(today);
    assert_eq!(p.state(), PickerState::Closed);
    assert_eq!(p.label(), "All Transactions");

    // closed picker ignores choices
    assert_eq!(p.choose(Preset::Last15, today), None);

    p.trigger();
    assert_eq!(p.state(), PickerState::Open);
    let emitted = p.choose(Preset::Last15, today);
    assert_eq!(emitted, Some(range(d(2024, 3, 5), today)));
    assert_eq!(p.state(), PickerState::Closed);
    assert_eq!(p.selected(), Preset::Last15);
    assert_eq!(p.label(), Preset::Last15.label());
}

#[test]
fn custom_emits_only_with_both_bounds() {
    let today = d(2024, 3, 20);
    let mut p = DateRangePicker::new(today);
    p.trigger();
    // end is pre-filled with today, start is still missing
    assert_eq!(p.choose(Preset::Custom, today), None);
    assert_eq!(p.state(), PickerState::AwaitingCustomBounds);
    assert_eq!(p.active(), DateRange::ALL);

    assert_eq!(p.set_custom_end(None), None);
    assert_eq!(p.set_custom_start(Some(d(2024, 1, 1))), None);
    let emitted = p.set_custom_end(Some(d(2024, 1, 31)));
    assert_eq!(emitted, Some(range(d(2024, 1, 1), d(2024, 1, 31))));
    assert_eq!(p.state(), PickerState::AwaitingCustomBounds);

    assert!(p.apply().is_some());
    assert_eq!(p.state(), PickerState::Closed);
    assert_eq!(p.label(), "Jan 1, 2024 - Jan 31, 2024");
}

#[test]
fn click_outside_keeps_active_range() {
    let today = d(2024, 3, 20);
    let mut p = DateRangePicker::new(today);
    p.trigger();
    p.choose(Preset::ThisYear, today);
    p.trigger();
    p.click_outside();
    assert_eq!(p.state(), PickerState::Closed);
    assert_eq!(p.active(), range(d(2024, 1, 1), d(2024, 12, 31)));
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["expenses", "expense", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, expense) = matches.subcommand().unwrap();
    let (_, list) = expense.subcommand().unwrap();
    list.clone()
}

#[test]
fn cli_range_flags_drive_the_picker() {
    let today = d(2024, 3, 20);

    let p = picker_from_args(&list_matches(&[]), today).unwrap();
    assert_eq!(p.active(), DateRange::ALL);

    let p = picker_from_args(&list_matches(&["--range", "last15"]), today).unwrap();
    assert_eq!(p.active(), range(d(2024, 3, 5), today));

    let p = picker_from_args(&list_matches(&["--from", "2024-03-01"]), today).unwrap();
    assert_eq!(p.active(), range(d(2024, 3, 1), today));

    let p = picker_from_args(
        &list_matches(&["-r", "custom", "--from", "2024-01-01", "--to", "2024-01-15"]),
        today,
    )
    .unwrap();
    assert_eq!(p.active(), range(d(2024, 1, 1), d(2024, 1, 15)));
}

#[test]
fn cli_custom_without_start_is_rejected() {
    let today = d(2024, 3, 20);
    assert!(picker_from_args(&list_matches(&["--range", "custom"]), today).is_err());
    assert!(picker_from_args(&list_matches(&["--to", "2024-03-01"]), today).is_err());
    assert!(picker_from_args(&list_matches(&["--range", "weekly"]), today).is_err());
    assert!(picker_from_args(&list_matches(&["--from", "03/01/2024"]), today).is_err());
}
