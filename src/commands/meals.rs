// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::calendar::{self, MonthCursor};
use crate::commands::{api_client, exporter, guarded_fetch, month_from_args, today};
use crate::inflight::{InFlight, Resource};
use crate::meals::{self, MealUpdate};
use crate::models::{MealRecord, MealSummary, NonVeg};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::path::PathBuf;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("calendar", sub)) => show_calendar(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("mark", sub)) => mark(conn, sub)?,
        Some(("nonveg", sub)) => non_veg(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("download", sub)) => download(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn fetch_meals(
    api: &ApiClient,
    inflight: &InFlight,
    cursor: MonthCursor,
) -> Result<Vec<MealRecord>> {
    guarded_fetch(inflight, Resource::Meals, || api.meals(cursor))
}

/// Server summary, or one computed from `local` when the server has none.
fn fetch_summary(
    api: &ApiClient,
    inflight: &InFlight,
    cursor: MonthCursor,
    local: &[MealRecord],
) -> Result<MealSummary> {
    let remote = guarded_fetch(inflight, Resource::MealSummary, || api.meal_summary(cursor))?;
    Ok(remote.unwrap_or_else(|| {
        tracing::debug!(
            month = cursor.month(),
            year = cursor.year(),
            "summary computed locally"
        );
        meals::summarize(local, cursor)
    }))
}

fn show_calendar(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today();
    let cursor = month_from_args(sub, today)?;
    let api = api_client(conn)?;
    let list = fetch_meals(&api, &InFlight::new(), cursor)?;
    let cells = calendar::build_grid(cursor, &list, Some(today));
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cells)? {
        return Ok(());
    }
    print!("{}", calendar::render_grid(cursor, &cells));
    println!("M = morning, E = evening, N = non-veg, [d] = today");
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cursor = month_from_args(sub, today())?;
    let api = api_client(conn)?;
    let mut list = fetch_meals(&api, &InFlight::new(), cursor)?;
    list.sort_by_key(|m| m.date);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
        return Ok(());
    }
    if list.is_empty() {
        println!("No meals recorded for {} {}.", cursor.name(), cursor.year());
        return Ok(());
    }
    let rows = list
        .iter()
        .map(|m| {
            vec![
                m.date.map(|d| d.to_string()).unwrap_or_default(),
                yes_no(m.morning),
                yes_no(m.evening),
                non_veg_items(&m.non_veg).join(", "),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Morning", "Evening", "Non-veg"], rows)
    );
    Ok(())
}

fn mark(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let taken = !sub.get_flag("missed");
    let update = match sub.get_one::<String>("meal").map(String::as_str) {
        Some("morning") => MealUpdate::Morning(taken),
        Some("evening") => MealUpdate::Evening(taken),
        other => return Err(anyhow!("Unknown meal: {:?}", other)),
    };
    apply(conn, date, update)
}

fn non_veg(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let next = NonVeg {
        omelette: sub.get_flag("omelette"),
        egg_curry: sub.get_flag("egg-curry"),
        chicken: sub.get_flag("chicken"),
        other: sub
            .get_one::<String>("other")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    };
    apply(conn, date, MealUpdate::NonVeg(next))
}

/// Sends one meal change, then refreshes the month's summary.
fn apply(conn: &Connection, date: chrono::NaiveDate, update: MealUpdate) -> Result<()> {
    let cursor = MonthCursor::containing(date);
    let api = api_client(conn)?;
    let inflight = InFlight::new();
    let mut list = fetch_meals(&api, &inflight, cursor)?;
    let previous = list
        .iter()
        .find(|m| m.date == Some(date))
        .map(|m| m.non_veg.clone())
        .unwrap_or_default();

    api.update_meal(date, &update)?;
    meals::apply_update(&mut list, date, &update);

    let messages = update.describe(&previous);
    if messages.is_empty() {
        println!("No change for {}", date);
    }
    for msg in messages {
        println!("{} ({})", msg, date);
    }

    let s = fetch_summary(&api, &inflight, cursor, &list)?;
    println!(
        "{}: {} / {} meals ({}%), total {}",
        cursor.short_label(),
        s.total_meals,
        s.total_possible,
        s.percentage,
        fmt_money(&s.total_cost)
    );
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cursor = month_from_args(sub, today())?;
    let api = api_client(conn)?;
    let inflight = InFlight::new();
    let list = fetch_meals(&api, &inflight, cursor)?;
    let s = fetch_summary(&api, &inflight, cursor, &list)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!("{} {}", cursor.name(), cursor.year());
    let rows = vec![
        vec!["Morning meals".into(), s.morning_count.to_string()],
        vec!["Evening meals".into(), s.evening_count.to_string()],
        vec![
            "Attendance".into(),
            format!("{} / {} ({}%)", s.total_meals, s.total_possible, s.percentage),
        ],
        vec!["Veg cost".into(), fmt_money(&s.veg_cost)],
        vec!["Non-veg cost".into(), fmt_money(&s.non_veg_cost)],
        vec!["Total cost".into(), fmt_money(&s.total_cost)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn download(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cursor = month_from_args(sub, today())?;
    let out = sub
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(meals::download_filename(cursor)));
    let bytes = api_client(conn)?.download_meals(cursor)?;
    exporter::save_blob(&bytes, &out)?;
    println!("Saved {} bytes to {}", bytes.len(), out.display());
    Ok(())
}

fn yes_no(v: bool) -> String {
    if v { "yes".into() } else { "no".into() }
}

fn non_veg_items(n: &NonVeg) -> Vec<String> {
    let mut items = Vec::new();
    if n.omelette {
        items.push("Omelette".to_string());
    }
    if n.egg_curry {
        items.push("Egg Curry".to_string());
    }
    if n.chicken {
        items.push("Chicken".to_string());
    }
    if !n.other.trim().is_empty() {
        items.push(n.other.trim().to_string());
    }
    items
}
