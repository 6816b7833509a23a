// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::config::Config;

mod api;
mod config;
mod env;
mod routing;
mod runtime;

fn main() {
    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return;
    }

    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::default();
    log::info!("Patching configuration from .env file and environment variables");
    env::parse_config_into(&mut config);
    log::debug!("Configuration: {config:?}");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            log::error!("Failed to create async runtime: {err}");
            return;
        }
    };

    if let Err(err) = rt.block_on(runtime::run(config)) {
        log::error!("Terminated with error: {err}");
    }

    log::info!("Exiting");
}
