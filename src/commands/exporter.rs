// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use anyhow::{Context, Result, anyhow};
use serde_json::json;
use std::path::Path;

/// Writes `rows` to `out` as `csv` or `json`.
pub fn export_transactions(rows: &[&Transaction], fmt: &str, out: &Path) -> Result<()> {
    match fmt.to_lowercase().as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record(["id", "kind", "date", "label", "amount", "icon", "description"])?;
            for t in rows {
                wtr.write_record([
                    t.id.clone(),
                    t.kind.to_string(),
                    t.date.map(|d| d.to_string()).unwrap_or_default(),
                    t.label.clone(),
                    t.amount.map(|a| a.to_string()).unwrap_or_default(),
                    t.icon.clone(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "kind": t.kind,
                        "date": t.date.map(|d| d.to_string()),
                        "label": t.label,
                        "amount": t.amount.map(|a| a.to_string()),
                        "icon": t.icon,
                        "description": t.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    Ok(())
}

/// Saves a downloaded blob untouched.
pub fn save_blob(bytes: &[u8], out: &Path) -> Result<()> {
    std::fs::write(out, bytes).with_context(|| format!("Write {}", out.display()))
}
