// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::theme::{THEMES, ThemeStore};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = ThemeStore::new(conn);
    match m.subcommand() {
        Some(("list", _)) => {
            let current = store.load()?;
            let rows = THEMES
                .iter()
                .map(|t| {
                    vec![
                        if t.key == current.key { "*".into() } else { String::new() },
                        t.emoji.to_string(),
                        t.key.to_string(),
                        t.name.to_string(),
                        t.accent.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["", "", "Key", "Name", "Accent"], rows)
            );
        }
        Some(("show", _)) => {
            let t = store.load()?;
            println!("{} {} ({})", t.emoji, t.name, t.key);
        }
        Some(("set", sub)) => {
            let t = store.select(sub.get_one::<String>("name").unwrap())?;
            println!("Theme set to {} {}", t.emoji, t.name);
        }
        _ => {}
    }
    Ok(())
}
