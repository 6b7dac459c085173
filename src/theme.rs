// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Theme catalog and the persisted theme selection.

use crate::db::{get_setting, set_setting};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;

const THEME_KEY: &str = "theme";
pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub accent: &'static str,
}

pub const THEMES: &[Theme] = &[
    Theme {
        key: "default",
        name: "Light Default",
        emoji: "☀️",
        accent: "#3b82f6",
    },
    Theme {
        key: "roseGold",
        name: "Rose Garden",
        emoji: "🌹",
        accent: "#e0a899",
    },
    Theme {
        key: "ocean",
        name: "Deep Ocean",
        emoji: "🌊",
        accent: "#00c8ff",
    },
    Theme {
        key: "rain",
        name: "Rainy Day",
        emoji: "🌧️",
        accent: "#7792e3",
    },
    Theme {
        key: "redWhite",
        name: "Red & White",
        emoji: "❤️",
        accent: "#ff5a5f",
    },
    Theme {
        key: "sunset",
        name: "Neon Sunset",
        emoji: "🌆",
        accent: "#ff79c6",
    },
    Theme {
        key: "glass",
        name: "Crystal Glass",
        emoji: "✨",
        accent: "#38bdf8",
    },
    Theme {
        key: "forest",
        name: "Dark Forest",
        emoji: "🌲",
        accent: "#5c9940",
    },
    Theme {
        key: "night",
        name: "Midnight",
        emoji: "🌙",
        accent: "#8f44fd",
    },
    Theme {
        key: "lavender",
        name: "Lavender Fields",
        emoji: "💜",
        accent: "#9b7dea",
    },
    Theme {
        key: "mint",
        name: "Fresh Mint",
        emoji: "🍀",
        accent: "#4dcf8f",
    },
    Theme {
        key: "coffee",
        name: "Coffee Break",
        emoji: "☕",
        accent: "#b38867",
    },
    Theme {
        key: "stone",
        name: "Granite",
        emoji: "🪨",
        accent: "#707070",
    },
    Theme {
        key: "cherry",
        name: "Cherry Blossom",
        emoji: "🌸",
        accent: "#e84a5f",
    },
    Theme {
        key: "autumn",
        name: "Autumn Leaves",
        emoji: "🍂",
        accent: "#e07a5f",
    },
    Theme {
        key: "azure",
        name: "Azure Sky",
        emoji: "☁️",
        accent: "#0284c7",
    },
];

pub fn find(key: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.key == key)
}

pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}

pub struct ThemeStore<'c> {
    conn: &'c Connection,
}

impl<'c> ThemeStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// The saved theme, or the default when nothing (or an unknown key) is stored.
    pub fn load(&self) -> Result<&'static Theme> {
        let saved = get_setting(self.conn, THEME_KEY)?;
        Ok(saved
            .as_deref()
            .and_then(find)
            .unwrap_or_else(default_theme))
    }

    pub fn select(&self, key: &str) -> Result<&'static Theme> {
        let theme = find(key).ok_or_else(|| {
            anyhow!(
                "Unknown theme '{}'. Available: {}",
                key,
                THEMES.iter().map(|t| t.key).collect::<Vec<_>>().join(", ")
            )
        })?;
        set_setting(self.conn, THEME_KEY, theme.key)?;
        tracing::info!(theme = theme.key, "theme selected");
        Ok(theme)
    }
}
