// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, API_URL_ENV};
use crate::db;
use crate::session::SessionStore;
use crate::theme::ThemeStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn)?,
        Some(("set-url", sub)) => {
            let url = config::set_api_url(conn, sub.get_one::<String>("url").unwrap())?;
            println!("API URL set to {}", url);
            if std::env::var(API_URL_ENV).is_ok() {
                println!("Note: ${} is set and takes precedence.", API_URL_ENV);
            }
        }
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let cfg = config::resolve(conn)?;
    let session = SessionStore::new(conn).hydrate()?;
    let user = match session.as_ref().and_then(|s| s.user.as_ref()) {
        Some(u) => format!("{} <{}>", u.full_name, u.email),
        None if session.is_some() => "(token only)".into(),
        None => "(not logged in)".into(),
    };
    let theme = ThemeStore::new(conn).load()?;
    let rows = vec![
        vec!["API URL".into(), cfg.api_url],
        vec!["Timeout".into(), format!("{}s", cfg.timeout.as_secs())],
        vec!["User".into(), user],
        vec!["Theme".into(), format!("{} {}", theme.emoji, theme.name)],
        vec!["Database".into(), db::db_path()?.display().to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
