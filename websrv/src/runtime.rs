// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::Filter as _;

use melodyhub_core::util::clock::DateTime;
use melodyhub_repo_sqlite::{initialize_database, run_migrations};
use melodyhub_storage_sqlite::connection::pool::{
    create_connection_pool, gatekeeper::Gatekeeper, get_pooled_connection,
};
use melodyhub_suno_client as suno;

use crate::{
    api,
    config::{Config, DatabaseConfig},
    routing,
};

fn provision_database(config: &DatabaseConfig) -> anyhow::Result<Gatekeeper> {
    log::info!(
        "Commissioning SQLite database: {storage}",
        storage = config.connection.storage,
    );

    // The maximum size of the pool defines the maximum number of
    // allowed readers while writers require exclusive access.
    let pool_max_size = config.connection.pool.max_size;
    log::info!("Creating connection pool of max. size {pool_max_size}");
    let connection_pool = create_connection_pool(&config.connection.storage, pool_max_size)?;

    log::info!("Initializing database");
    initialize_database(&mut *get_pooled_connection(&connection_pool)?)?;

    if config.migrate_schema_on_startup {
        log::info!("Migrating database schema");
        run_migrations(&mut *get_pooled_connection(&connection_pool)?)
            .map_err(|err| anyhow::anyhow!("{err}"))?;
    }

    Ok(Gatekeeper::new(
        connection_pool,
        config.connection.pool.gatekeeper,
    ))
}

pub(crate) async fn run(config: Config) -> anyhow::Result<()> {
    let launched_at = DateTime::now_utc();

    log::info!("Launching");
    let shared_connection_gatekeeper = Arc::new(provision_database(&config.database)?);

    if config.generation.api_key.is_none() {
        // Not fatal at startup: generation requests fail with a
        // configuration error until the credential is provided.
        log::warn!("No API credential configured for the generation service");
    }
    let generation_client = Arc::new(suno::Client::new(config.generation.clone()));

    let about_json = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance": {
            "launchedAt": launched_at.to_string(),
        },
    });

    log::info!("Creating service routes");
    let all_filters = routing::app::create_filters(
        Arc::clone(&shared_connection_gatekeeper),
        generation_client,
        about_json,
    );

    log::info!("Initializing server");
    let server = warp::serve(
        all_filters
            .with(warp::cors().allow_any_origin())
            .recover(api::handle_rejection),
    );

    let (socket_addr, server_listener) = server.try_bind_with_graceful_shutdown(
        config.network.endpoint.socket_addr(),
        async move {
            tokio::signal::ctrl_c().await.ok();
            log::info!("Received termination signal");
        },
    )?;

    log::info!("Listening on {socket_addr}");
    server_listener.await;

    log::info!("Stopping");
    shared_connection_gatekeeper.close();

    log::info!("Terminating");
    Ok(())
}
