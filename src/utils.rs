// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::time::Duration;

use crate::models::ChartBucket;

const UA: &str = concat!("expenses/", env!("CARGO_PKG_VERSION"));

pub const MIN_PASSWORD_LEN: usize = 7;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .default_headers(headers)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts entered by the user must be strictly positive.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)
        .context("Amount is required and should be a valid number.")?;
    if d <= Decimal::ZERO {
        return Err(anyhow!(
            "Amount is required and should be a valid number (got {}).",
            s
        ));
    }
    Ok(d)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(anyhow!("Please enter a valid email address"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(anyhow!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("Rs {:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Horizontal text bars scaled to the largest bucket.
pub fn bar_chart(buckets: &[ChartBucket], width: usize) -> String {
    let max = buckets
        .iter()
        .map(|b| b.amount.abs())
        .max()
        .unwrap_or(Decimal::ZERO);
    let key_w = buckets.iter().map(|b| b.key.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for b in buckets {
        let len = if max.is_zero() {
            0
        } else {
            (b.amount.abs() / max * Decimal::from(width as u64))
                .round()
                .to_usize()
                .unwrap_or(0)
        };
        out.push_str(&format!(
            "{:<key_w$} │{} {:.2}\n",
            b.key,
            "█".repeat(len),
            b.amount,
            key_w = key_w
        ));
    }
    out
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.io"));
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("abc").is_err());
        assert_eq!(parse_amount(" 12.50 ").unwrap(), Decimal::new(1250, 2));
    }

    #[test]
    fn bars_scale_to_largest() {
        let buckets = vec![
            ChartBucket {
                key: "Food".into(),
                amount: Decimal::from(100),
            },
            ChartBucket {
                key: "Bus".into(),
                amount: Decimal::from(50),
            },
        ];
        let text = bar_chart(&buckets, 10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].matches('█').count(), 10);
        assert_eq!(lines[1].matches('█').count(), 5);
    }
}
