// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod api;
pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod daterange;
pub mod db;
pub mod filter;
pub mod inflight;
pub mod meals;
pub mod models;
pub mod session;
pub mod theme;
pub mod utils;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the stderr log subscriber. `RUST_LOG` overrides the `expenses=info` default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expenses=info"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
