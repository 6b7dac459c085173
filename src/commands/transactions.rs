// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::api::{ApiClient, paths, wire::NewTransaction};
use crate::commands::{api_client, exporter, guarded_fetch, today};
use crate::daterange::{self, DateRangePicker, Preset};
use crate::filter::filter_transactions;
use crate::inflight::{InFlight, Resource};
use crate::models::{DateRange, Transaction, TransactionKind};
use crate::utils::{
    bar_chart, fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table,
};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;

const CHART_WIDTH: usize = 40;

pub fn handle(conn: &Connection, kind: TransactionKind, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, kind, sub)?,
        Some(("add", sub)) => add(conn, kind, sub)?,
        Some(("rm", sub)) => remove(conn, kind, sub)?,
        Some(("download", sub)) => download(conn, kind, sub)?,
        Some(("chart", sub)) => chart(conn, kind, sub)?,
        Some(("export", sub)) => export(conn, kind, sub)?,
        _ => {}
    }
    Ok(())
}

/// Drives a [`DateRangePicker`] from `--range`/`--from`/`--to`.
///
/// `--from`/`--to` without `--range` imply a custom range. A custom range whose
/// `--to` is omitted ends today.
pub fn picker_from_args(sub: &clap::ArgMatches, today: NaiveDate) -> Result<DateRangePicker> {
    let from = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    let preset = match sub.get_one::<String>("range") {
        Some(r) => r.parse::<Preset>()?,
        None if from.is_some() || to.is_some() => Preset::Custom,
        None => Preset::All,
    };

    let mut picker = DateRangePicker::new(today);
    if preset == Preset::All {
        return Ok(picker);
    }
    picker.trigger();
    picker.choose(preset, today);
    if preset == Preset::Custom {
        picker.set_custom_start(from);
        if to.is_some() {
            picker.set_custom_end(to);
        }
        if picker.apply().is_none() {
            return Err(anyhow!("Custom range needs both --from and --to"));
        }
    }
    Ok(picker)
}

fn fetch(api: &ApiClient, kind: TransactionKind) -> Result<Vec<Transaction>> {
    let inflight = InFlight::new();
    let resource = match kind {
        TransactionKind::Income => Resource::Income,
        TransactionKind::Expense => Resource::Expense,
    };
    guarded_fetch(&inflight, resource, || api.list_transactions(kind))
}

struct Filtered {
    all: Vec<Transaction>,
    query: String,
    range: DateRange,
    label: String,
}

impl Filtered {
    fn load(conn: &Connection, kind: TransactionKind, sub: &clap::ArgMatches) -> Result<Self> {
        let picker = picker_from_args(sub, today())?;
        let api = api_client(conn)?;
        let all = fetch(&api, kind)?;
        Ok(Self {
            all,
            query: sub
                .get_one::<String>("search")
                .cloned()
                .unwrap_or_default(),
            range: picker.active(),
            label: picker.label().to_string(),
        })
    }

    fn rows(&self) -> Vec<&Transaction> {
        filter_transactions(&self.all, &self.query, &self.range)
    }

    fn caption(&self, shown: usize) -> String {
        let mut s = format!(
            "Showing {} of {} ({}, {})",
            shown,
            self.all.len(),
            self.label,
            daterange::describe(&self.range)
        );
        if !self.query.trim().is_empty() {
            s.push_str(&format!(", matching '{}'", self.query.trim()));
        }
        s
    }
}

fn list(conn: &Connection, kind: TransactionKind, sub: &clap::ArgMatches) -> Result<()> {
    let data = Filtered::load(conn, kind, sub)?;
    let rows = data.rows();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if data.all.is_empty() {
        println!("No {} records yet.", kind);
        return Ok(());
    }
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            vec![
                t.date.map(|d| d.to_string()).unwrap_or_default(),
                format!("{} {}", t.icon, t.label).trim().to_string(),
                t.amount.map(|a| fmt_money(&a)).unwrap_or_else(|| "?".into()),
                t.description.clone().unwrap_or_default(),
                t.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", kind.label_name(), "Amount", "Description", "Id"],
            table_rows
        )
    );
    println!("{}", data.caption(rows.len()));
    println!("Total: {}", fmt_money(&aggregate::total(rows.iter().copied())));
    Ok(())
}

fn add(conn: &Connection, kind: TransactionKind, sub: &clap::ArgMatches) -> Result<()> {
    let label = sub.get_one::<String>("label").unwrap().trim().to_string();
    if label.is_empty() {
        return Err(anyhow!(
            "{} is required.",
            match kind {
                TransactionKind::Income => "Income source",
                TransactionKind::Expense => "Category",
            }
        ));
    }
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())
        .map_err(|_| anyhow!("Date is required (YYYY-MM-DD)."))?;
    let tx = NewTransaction {
        label,
        amount,
        date,
        icon: sub.get_one::<String>("icon").cloned().unwrap_or_default(),
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    api_client(conn)?.add_transaction(kind, &tx)?;
    println!(
        "Added {} '{}' of {} on {}",
        kind,
        tx.label,
        fmt_money(&tx.amount),
        tx.date
    );
    Ok(())
}

fn remove(conn: &Connection, kind: TransactionKind, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    api_client(conn)?.delete_transaction(kind, id)?;
    println!("Deleted {} {}", kind, id);
    Ok(())
}

fn download(conn: &Connection, kind: TransactionKind, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(paths::download_filename(kind)));
    let bytes = api_client(conn)?.download_transactions(kind)?;
    exporter::save_blob(&bytes, &out)?;
    println!("Saved {} bytes to {}", bytes.len(), out.display());
    Ok(())
}

#[derive(Serialize)]
#[serde(untagged)]
enum ChartData {
    Buckets(Vec<crate::models::ChartBucket>),
    Points(Vec<crate::models::ChartPoint>),
}

fn chart(conn: &Connection, kind: TransactionKind, sub: &clap::ArgMatches) -> Result<()> {
    let data = Filtered::load(conn, kind, sub)?;
    let rows = data.rows();
    let by = sub.get_one::<String>("by").map(String::as_str).unwrap_or("label");
    let chart = match by {
        "label" => ChartData::Buckets(aggregate::by_label(rows.iter().copied())),
        "month" => ChartData::Buckets(aggregate::by_month(rows.iter().copied())),
        "day" => ChartData::Points(aggregate::daily_points(rows.iter().copied())),
        other => return Err(anyhow!("Unknown grouping: {}", other)),
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &chart)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("Nothing to chart. {}", data.caption(0));
        return Ok(());
    }
    match chart {
        ChartData::Buckets(buckets) => print!("{}", bar_chart(&buckets, CHART_WIDTH)),
        ChartData::Points(points) => {
            let table_rows = points
                .into_iter()
                .map(|p| vec![p.label, p.key, fmt_money(&p.amount)])
                .collect();
            println!(
                "{}",
                pretty_table(&["Day", kind.label_name(), "Amount"], table_rows)
            );
        }
    }
    println!("{}", data.caption(rows.len()));
    Ok(())
}

fn export(conn: &Connection, kind: TransactionKind, sub: &clap::ArgMatches) -> Result<()> {
    let data = Filtered::load(conn, kind, sub)?;
    let rows = data.rows();
    let fmt = sub.get_one::<String>("format").unwrap();
    let out = PathBuf::from(sub.get_one::<String>("out").unwrap());
    exporter::export_transactions(&rows, fmt, &out)?;
    println!("Exported {} {} rows to {}", rows.len(), kind, out.display());
    Ok(())
}
