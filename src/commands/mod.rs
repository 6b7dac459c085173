// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod exporter;
pub mod meals;
pub mod theme;
pub mod transactions;

use crate::api::{ApiClient, ApiResult};
use crate::calendar::MonthCursor;
use crate::inflight::{InFlight, Resource};
use crate::session::SessionStore;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Client for the configured API carrying the stored token, if any.
pub fn api_client(conn: &Connection) -> Result<ApiClient> {
    let config = crate::config::resolve(conn)?;
    let token = SessionStore::new(conn).token()?;
    Ok(ApiClient::new(&config, token)?)
}

/// Runs `f` under `inflight`'s guard for `resource`.
///
/// Commands issue their fetches one after another on a single `InFlight`, so a skip
/// only happens when `f` itself re-enters a fetch of the same resource.
pub fn guarded_fetch<T, F>(inflight: &InFlight, resource: Resource, f: F) -> Result<T>
where
    F: FnOnce() -> ApiResult<T>,
{
    inflight
        .guarded(resource, f)?
        .ok_or_else(|| anyhow!("A {} fetch is already running", resource))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `--month`/`--year` with the current month filling whatever is missing.
pub fn month_from_args(sub: &clap::ArgMatches, today: NaiveDate) -> Result<MonthCursor> {
    let current = MonthCursor::containing(today);
    let month = sub
        .get_one::<u32>("month")
        .copied()
        .unwrap_or(current.month());
    let year = sub.get_one::<i32>("year").copied().unwrap_or(current.year());
    MonthCursor::new(month, year)
}
