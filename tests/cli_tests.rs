// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use expenses::cli;
use expenses::commands::month_from_args;
use chrono::NaiveDate;

#[test]
fn income_add_takes_source_as_label() {
    let matches = cli::build_cli().get_matches_from([
        "expenses", "income", "add", "--source", "Salary", "--amount", "5000", "--date",
        "2024-03-01",
    ]);
    let Some(("income", income)) = matches.subcommand() else {
        panic!("no income subcommand");
    };
    let Some(("add", add)) = income.subcommand() else {
        panic!("no add subcommand");
    };
    assert_eq!(add.get_one::<String>("label").unwrap(), "Salary");
    assert_eq!(add.get_one::<String>("icon").unwrap(), "");
}

#[test]
fn expense_add_requires_category() {
    let res = cli::build_cli().try_get_matches_from([
        "expenses", "expense", "add", "--amount", "5", "--date", "2024-03-01",
    ]);
    assert!(res.is_err());
}

#[test]
fn chart_grouping_is_restricted() {
    assert!(
        cli::build_cli()
            .try_get_matches_from(["expenses", "expense", "chart", "--by", "week"])
            .is_err()
    );
    assert!(
        cli::build_cli()
            .try_get_matches_from(["expenses", "expense", "chart", "--by", "month"])
            .is_ok()
    );
}

#[test]
fn json_flags_conflict() {
    let res = cli::build_cli().try_get_matches_from([
        "expenses", "dashboard", "--json", "--jsonl",
    ]);
    assert!(res.is_err());
}

#[test]
fn month_args_default_to_current_month() {
    let today = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
    let matches = cli::build_cli().get_matches_from(["expenses", "meals", "summary", "-y", "2023"]);
    let (_, meals) = matches.subcommand().unwrap();
    let (_, summary) = meals.subcommand().unwrap();
    let cursor = month_from_args(summary, today).unwrap();
    assert_eq!((cursor.month(), cursor.year()), (7, 2023));

    let matches = cli::build_cli().get_matches_from(["expenses", "meals", "calendar", "-m", "13"]);
    let (_, meals) = matches.subcommand().unwrap();
    let (_, calendar) = meals.subcommand().unwrap();
    assert!(month_from_args(calendar, today).is_err());
}

#[test]
fn meals_mark_accepts_missed_flag() {
    let matches = cli::build_cli().get_matches_from([
        "expenses", "meals", "mark", "--date", "2024-03-02", "--meal", "evening", "--missed",
    ]);
    let (_, meals) = matches.subcommand().unwrap();
    let (_, mark) = meals.subcommand().unwrap();
    assert!(mark.get_flag("missed"));
    assert_eq!(mark.get_one::<String>("meal").unwrap(), "evening");
}
