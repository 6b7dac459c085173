// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiError;
use crate::commands::api_client;
use crate::session::SessionStore;
use crate::utils::validate_credentials;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

const PASSWORD_ENV: &str = "EXPENSES_PASSWORD";

fn password_arg(sub: &clap::ArgMatches) -> Result<String> {
    if let Some(p) = sub.get_one::<String>("password") {
        return Ok(p.clone());
    }
    std::env::var(PASSWORD_ENV)
        .with_context(|| format!("Pass --password or set ${}", PASSWORD_ENV))
}

pub fn login(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap().trim().to_string();
    let password = password_arg(sub)?;
    validate_credentials(&email, &password)?;

    let api = api_client(conn)?;
    let (token, user) = api.login(&email, &password).map_err(|e| match e {
        // a 401 here means bad credentials, not an expired session
        ApiError::Unauthorized => anyhow!("Invalid email or password"),
        other => other.into(),
    })?;
    SessionStore::new(conn).login(&token, &user)?;
    println!("Logged in as {} <{}>", user.full_name, user.email);
    Ok(())
}

pub fn signup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let email = sub.get_one::<String>("email").unwrap().trim().to_string();
    if name.is_empty() {
        return Err(anyhow!("Please enter your name"));
    }
    let password = password_arg(sub)?;
    validate_credentials(&email, &password)?;

    let api = api_client(conn)?;
    let (token, user) = api.register(&name, &email, &password)?;
    SessionStore::new(conn).login(&token, &user)?;
    println!("Account created. Welcome, {}!", user.full_name);
    Ok(())
}

pub fn logout(conn: &Connection) -> Result<()> {
    SessionStore::new(conn).clear()?;
    println!("Logged out.");
    Ok(())
}

/// Shows the cached user right away, then refreshes it from the server.
/// Only a 401 discards the session; other failures keep the cached copy.
pub fn whoami(conn: &Connection) -> Result<()> {
    let store = SessionStore::new(conn);
    let Some(session) = store.hydrate()? else {
        println!("Not logged in.");
        return Ok(());
    };
    if let Some(u) = &session.user {
        println!("{} <{}> (cached)", u.full_name, u.email);
    }
    let api = api_client(conn)?;
    match api.current_user() {
        Ok(user) => {
            if session.user.as_ref() != Some(&user) {
                store.update_user(&user)?;
            }
            println!("{} <{}> (verified)", user.full_name, user.email);
            Ok(())
        }
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::warn!(error = %e, api = api.base_url(), "could not verify session");
            eprintln!("Could not verify session with {}: {}", api.base_url(), e);
            Ok(())
        }
    }
}
