// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Authenticated-user store backed by the settings table.

use crate::db::{delete_setting, get_setting, set_setting};
use crate::models::User;
use anyhow::{Context, Result};
use rusqlite::Connection;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
}

pub struct SessionStore<'c> {
    conn: &'c Connection,
}

impl<'c> SessionStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Loads the persisted session. A stored user without a token is not a session.
    pub fn hydrate(&self) -> Result<Option<Session>> {
        let Some(token) = get_setting(self.conn, TOKEN_KEY)? else {
            return Ok(None);
        };
        let user = match get_setting(self.conn, USER_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(u) => Some(u),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable cached user");
                    None
                }
            },
            None => None,
        };
        Ok(Some(Session { token, user }))
    }

    pub fn token(&self) -> Result<Option<String>> {
        get_setting(self.conn, TOKEN_KEY)
    }

    pub fn login(&self, token: &str, user: &User) -> Result<()> {
        set_setting(self.conn, TOKEN_KEY, token)?;
        self.update_user(user)?;
        tracing::info!(email = %user.email, "session stored");
        Ok(())
    }

    pub fn update_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user).context("Serialize user")?;
        set_setting(self.conn, USER_KEY, &raw)
    }

    /// Removes token and cached user.
    pub fn clear(&self) -> Result<()> {
        delete_setting(self.conn, TOKEN_KEY)?;
        delete_setting(self.conn, USER_KEY)?;
        tracing::info!("session cleared");
        Ok(())
    }
}
