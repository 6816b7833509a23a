// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use diesel::{r2d2, Connection as _, SqliteConnection};
use serde::{Deserialize, Serialize};

use crate::Result;

use super::Storage;

pub mod gatekeeper;

pub type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;

pub type ConnectionPool = r2d2::Pool<ConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub max_size: NonZeroU32,
    pub gatekeeper: gatekeeper::Config,
}

pub fn create_connection_pool(storage: &Storage, max_size: NonZeroU32) -> Result<ConnectionPool> {
    let connection_string = storage.connection_string();
    // Establish a probe connection before building the pool to fail
    // early. r2d2 would otherwise retry and log errors repeatedly for
    // an inaccessible database file instead of returning an error.
    // The probe is dropped immediately and missing files have been
    // created once this point is reached.
    let _ = SqliteConnection::establish(&connection_string)?;
    let manager = ConnectionManager::new(connection_string);
    let pool = ConnectionPool::builder()
        .max_size(max_size.get())
        .build(manager)?;
    Ok(pool)
}

pub fn get_pooled_connection(pool: &ConnectionPool) -> Result<PooledConnection> {
    pool.get().map_err(Into::into)
}
