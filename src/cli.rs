// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::models::TransactionKind;

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn filter_args() -> [Arg; 4] {
    [
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive text matched against label, amount and description"),
        Arg::new("range")
            .long("range")
            .short('r')
            .help("all | last15 | last25 | thisMonth | thisYear | custom"),
        Arg::new("from")
            .long("from")
            .help("Custom range start (YYYY-MM-DD)"),
        Arg::new("to").long("to").help("Custom range end (YYYY-MM-DD)"),
    ]
}

fn month_args() -> [Arg; 2] {
    [
        Arg::new("month")
            .long("month")
            .short('m')
            .value_parser(value_parser!(u32))
            .help("Month 1-12 (defaults to the current month)"),
        Arg::new("year")
            .long("year")
            .short('y')
            .value_parser(value_parser!(i32))
            .help("Year (defaults to the current year)"),
    ]
}

fn transaction_cmd(kind: TransactionKind) -> Command {
    let (name, label_long, about) = match kind {
        TransactionKind::Income => ("income", "source", "Income records"),
        TransactionKind::Expense => ("expense", "category", "Expense records"),
    };
    Command::new(name)
        .about(about)
        .subcommand(
            Command::new("list")
                .about("List records, optionally filtered")
                .args(filter_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("add")
                .about("Add a record")
                .arg(Arg::new("label").long(label_long).required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("icon").long("icon").default_value(""))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a record by id")
                .arg(Arg::new("id").long("id").required(true)),
        )
        .subcommand(
            Command::new("download")
                .about("Save the server-side spreadsheet export")
                .arg(Arg::new("out").long("out").short('o')),
        )
        .subcommand(
            Command::new("chart")
                .about("Chart totals by label, month or day")
                .arg(
                    Arg::new("by")
                        .long("by")
                        .value_parser(["label", "month", "day"])
                        .default_value("label"),
                )
                .args(filter_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("export")
                .about("Write the filtered list to a local CSV or JSON file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").short('o').required(true))
                .args(filter_args()),
        )
}

pub fn build_cli() -> Command {
    Command::new("expenses")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track income, expenses and meal attendance against the expenses API")
        .subcommand(
            Command::new("login")
                .about("Log in and store the session")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Falls back to $EXPENSES_PASSWORD"),
                ),
        )
        .subcommand(
            Command::new("signup")
                .about("Create an account and store the session")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Falls back to $EXPENSES_PASSWORD"),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("dashboard")
                .about("Totals, recent activity and last-30/60-day charts")
                .args(json_args()),
        )
        .subcommand(transaction_cmd(TransactionKind::Income))
        .subcommand(transaction_cmd(TransactionKind::Expense))
        .subcommand(
            Command::new("meals")
                .about("Meal attendance")
                .subcommand(
                    Command::new("calendar")
                        .about("Month calendar with attendance marks")
                        .args(month_args())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("list")
                        .about("Recorded days of a month")
                        .args(month_args())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("mark")
                        .about("Mark a morning/evening meal as taken (or missed)")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("meal")
                                .long("meal")
                                .value_parser(["morning", "evening"])
                                .required(true),
                        )
                        .arg(
                            Arg::new("missed")
                                .long("missed")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("nonveg")
                        .about("Set the non-veg items of a day")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("omelette").long("omelette").action(ArgAction::SetTrue))
                        .arg(Arg::new("egg-curry").long("egg-curry").action(ArgAction::SetTrue))
                        .arg(Arg::new("chicken").long("chicken").action(ArgAction::SetTrue))
                        .arg(Arg::new("other").long("other").default_value("")),
                )
                .subcommand(
                    Command::new("summary")
                        .about("Monthly counts and costs")
                        .args(month_args())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("download")
                        .about("Save the month's attendance spreadsheet")
                        .args(month_args())
                        .arg(Arg::new("out").long("out").short('o')),
                ),
        )
        .subcommand(
            Command::new("theme")
                .about("Display theme")
                .subcommand(Command::new("list").about("Available themes"))
                .subcommand(Command::new("show").about("Current theme"))
                .subcommand(
                    Command::new("set")
                        .about("Select a theme")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Client configuration")
                .subcommand(Command::new("show").about("Effective settings"))
                .subcommand(
                    Command::new("set-url")
                        .about("Store the API base URL")
                        .arg(Arg::new("url").required(true)),
                ),
        )
}
