// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, fmt, num::NonZeroU32, path::PathBuf, str::FromStr};

use tracing::{subscriber::set_global_default, Subscriber};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;
use url::Url;

use melodyhub_storage_sqlite::connection::Storage;

use crate::config::Config;

pub fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {path:?}");
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        let rust_log_from_env = env::var("RUST_LOG").ok();
        if let Some(rust_log_from_env) = rust_log_from_env {
            if !rust_log_from_env.is_empty() {
                eprintln!("Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}");
            }
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT.to_owned())
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    let env_filter = create_env_filter();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish()
}

pub fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    let subscriber = create_tracing_subscriber();
    set_global_default(subscriber)?;

    Ok(())
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";
const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const DATABASE_URL_IN_MEMORY: &str = ":memory:";
const DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV: &str = "DATABASE_MIGRATE_SCHEMA_ON_STARTUP";
const DATABASE_CONNECTION_POOL_SIZE_ENV: &str = "DATABASE_CONNECTION_POOL_SIZE";

const SUNO_API_KEY_ENV: &str = "SUNO_API_KEY";
const SUNO_API_BASE_URL_ENV: &str = "SUNO_API_BASE_URL";
const SUNO_POLL_MAX_ATTEMPTS_ENV: &str = "SUNO_POLL_MAX_ATTEMPTS";
const SUNO_POLL_DELAY_MILLIS_ENV: &str = "SUNO_POLL_DELAY_MILLIS";

fn read_var(key: &str) -> Option<String> {
    let var = env::var(key).ok()?;
    if var.trim().is_empty() {
        return None;
    }
    tracing::debug!("{key} = {var}");
    Some(var)
}

fn parse_var<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let var = read_var(key)?;
    var.parse()
        .map_err(|err| {
            tracing::warn!("Failed to parse {key} = {var}: {err}");
        })
        .ok()
}

fn parse_bool_var(key: &str) -> Option<bool> {
    let var = read_var(key)?;
    match var.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => {
            tracing::warn!("Failed to parse {key} = {var}");
            None
        }
    }
}

fn parse_database_storage() -> Option<Storage> {
    let var = read_var(DATABASE_URL_ENV)?;
    if var == DATABASE_URL_IN_MEMORY {
        return Some(Storage::InMemory);
    }
    Some(Storage::File {
        path: PathBuf::from(var),
    })
}

/// Patch the configuration from environment variables.
///
/// Unset or unparsable variables leave the corresponding value
/// untouched.
pub fn parse_config_into(config: &mut Config) {
    if let Some(ip_addr) = parse_var(ENDPOINT_IP_ENV) {
        config.network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_var(ENDPOINT_PORT_ENV) {
        config.network.endpoint.port = port;
    }

    if let Some(storage) = parse_database_storage() {
        config.database.connection.storage = storage;
    }
    if let Some(migrate_schema_on_startup) =
        parse_bool_var(DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV)
    {
        config.database.migrate_schema_on_startup = migrate_schema_on_startup;
    }
    if let Some(max_size) = parse_var::<NonZeroU32>(DATABASE_CONNECTION_POOL_SIZE_ENV) {
        config.database.connection.pool.max_size = max_size;
    }

    if let Some(api_key) = read_var(SUNO_API_KEY_ENV) {
        config.generation.api_key = Some(api_key);
    }
    if let Some(api_base_url) = parse_var::<Url>(SUNO_API_BASE_URL_ENV) {
        config.generation.api_base_url = api_base_url;
    }
    if let Some(max_attempts) = parse_var(SUNO_POLL_MAX_ATTEMPTS_ENV) {
        config.generation.retry.max_attempts = max_attempts;
    }
    if let Some(delay_millis) = parse_var(SUNO_POLL_DELAY_MILLIS_ENV) {
        config.generation.retry.delay_millis = delay_millis;
    }
}
