// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    num::{NonZeroU32, NonZeroU64},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use melodyhub_storage_sqlite::connection::{
    pool::{
        gatekeeper::Config as DatabaseConnectionGatekeeperConfig,
        Config as DatabaseConnectionPoolConfig,
    },
    Config as DatabaseConnectionConfig, Storage,
};

pub type GenerationConfig = melodyhub_suno_client::Config;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub ip_addr: IpAddr,
    pub port: u16,
}

const DEFAULT_ENDPOINT_PORT: u16 = 8080;

impl EndpointConfig {
    pub const fn new_v6() -> Self {
        Self {
            ip_addr: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            port: DEFAULT_ENDPOINT_PORT,
        }
    }

    #[allow(unused)]
    pub const fn new_v4() -> Self {
        Self {
            ip_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_ENDPOINT_PORT,
        }
    }

    #[must_use]
    pub fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new_v6()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub connection: DatabaseConnectionConfig,
    pub migrate_schema_on_startup: bool,
}

const DEFAULT_DATABASE_CONNECTION_POOL_SIZE: u32 = 8;

const DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_READ: Duration = Duration::from_secs(10);

const DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_WRITE: Duration = Duration::from_secs(30);

fn non_zero_duration_as_millis(duration: Duration) -> NonZeroU64 {
    let millis: u64 = duration.as_millis().try_into().expect("u64 millis");
    debug_assert!(millis > 0);
    millis.try_into().expect("non-zero millis")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection: DatabaseConnectionConfig {
                storage: Storage::InMemory,
                pool: DatabaseConnectionPoolConfig {
                    max_size: NonZeroU32::new(DEFAULT_DATABASE_CONNECTION_POOL_SIZE)
                        .expect("non-zero size"),
                    gatekeeper: DatabaseConnectionGatekeeperConfig {
                        acquire_read_timeout_millis: non_zero_duration_as_millis(
                            DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_READ,
                        ),
                        acquire_write_timeout_millis: non_zero_duration_as_millis(
                            DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_WRITE,
                        ),
                    },
                },
            },
            migrate_schema_on_startup: true,
        }
    }
}
