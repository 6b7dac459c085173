// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::commands::{api_client, guarded_fetch};
use crate::inflight::{InFlight, Resource};
use crate::models::{DashboardData, TransactionKind};
use crate::utils::{bar_chart, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

const CHART_WIDTH: usize = 30;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let api = api_client(conn)?;
    let inflight = InFlight::new();
    let data = guarded_fetch(&inflight, Resource::Dashboard, || api.dashboard())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    print!("{}", render(&data));
    Ok(())
}

/// Text rendition of the dashboard: totals, recent activity and the two windows.
pub fn render(data: &DashboardData) -> String {
    let s = &data.summary;
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        pretty_table(
            &["Total Balance", "Total Income", "Total Expenses"],
            vec![vec![
                fmt_money(&s.total_balance),
                fmt_money(&s.total_income),
                fmt_money(&s.total_expenses),
            ]],
        )
    ));

    out.push_str("\nRecent Transactions\n");
    if data.recent.is_empty() {
        out.push_str("  (none)\n");
    } else {
        let rows = data
            .recent
            .iter()
            .map(|t| {
                let signed = match t.kind {
                    TransactionKind::Income => format!("+{}", fmt_money(&t.amount_or_zero())),
                    TransactionKind::Expense => format!("-{}", fmt_money(&t.amount_or_zero())),
                };
                vec![
                    t.date.map(|d| d.to_string()).unwrap_or_default(),
                    format!("{} {}", t.icon, t.label).trim().to_string(),
                    signed,
                ]
            })
            .collect();
        out.push_str(&format!(
            "{}\n",
            pretty_table(&["Date", "Label", "Amount"], rows)
        ));
    }

    let expenses = &data.last_30_days_expenses;
    out.push_str(&format!(
        "\nLast 30 Days Expenses ({})\n",
        fmt_money(&expenses.total)
    ));
    out.push_str(&bars_or_none(&aggregate::by_label(&expenses.transactions)));

    let income = &data.last_60_days_income;
    out.push_str(&format!(
        "\nLast 60 Days Income ({})\n",
        fmt_money(&income.total)
    ));
    out.push_str(&bars_or_none(&aggregate::by_label(&income.transactions)));
    out
}

fn bars_or_none(buckets: &[crate::models::ChartBucket]) -> String {
    if buckets.is_empty() {
        "  (none)\n".to_string()
    } else {
        bar_chart(buckets, CHART_WIDTH)
    }
}
