// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

mod api;
mod app;
mod config;
mod error;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    init_tracing();

    let (config, warning) = config::load();
    tracing::info!(api = %config.api_base_url, max_files = config.max_files, "starting");

    app::run(config, warning)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
