// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{get_setting, set_setting};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::time::Duration;

pub const API_URL_ENV: &str = "EXPENSES_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const API_URL_KEY: &str = "api_url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
}

/// Environment variable first, then the stored setting, then the default.
pub fn resolve(conn: &Connection) -> Result<Config> {
    resolve_with(conn, std::env::var(API_URL_ENV).ok())
}

pub fn resolve_with(conn: &Connection, env_url: Option<String>) -> Result<Config> {
    let api_url = match env_url.filter(|s| !s.trim().is_empty()) {
        Some(url) => url,
        None => get_setting(conn, API_URL_KEY)?.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
    };
    Ok(Config {
        api_url: api_url.trim().trim_end_matches('/').to_string(),
        timeout: REQUEST_TIMEOUT,
    })
}

pub fn set_api_url(conn: &Connection, url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!("Invalid API URL '{}', expected http(s)://", url));
    }
    set_setting(conn, API_URL_KEY, url)?;
    Ok(url.to_string())
}
