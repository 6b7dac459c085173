// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use expenses::api::ApiError;
use expenses::models::TransactionKind;
use expenses::session::SessionStore;
use expenses::{cli, commands, db, init_tracing};

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    let outcome = match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(&conn, sub),
        Some(("signup", sub)) => commands::auth::signup(&conn, sub),
        Some(("logout", _)) => commands::auth::logout(&conn),
        Some(("whoami", _)) => commands::auth::whoami(&conn),
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, sub),
        Some(("income", sub)) => {
            commands::transactions::handle(&conn, TransactionKind::Income, sub)
        }
        Some(("expense", sub)) => {
            commands::transactions::handle(&conn, TransactionKind::Expense, sub)
        }
        Some(("meals", sub)) => commands::meals::handle(&conn, sub),
        Some(("theme", sub)) => commands::theme::handle(&conn, sub),
        Some(("config", sub)) => commands::config::handle(&conn, sub),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    // any 401 ends the stored session
    if let Err(e) = &outcome {
        if matches!(e.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized)) {
            SessionStore::new(&conn).clear()?;
        }
    }
    outcome
}
