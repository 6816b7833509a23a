// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

pub mod pool;

/// Location of the SQLite database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Storage {
    /// Private, volatile database. Contents are lost when the
    /// connection pool is dropped.
    InMemory,

    File {
        path: PathBuf,
    },
}

const IN_MEMORY_CONNECTION: &str = ":memory:";

impl Storage {
    #[must_use]
    pub fn connection_string(&self) -> String {
        match self {
            Self::InMemory => IN_MEMORY_CONNECTION.to_owned(),
            Self::File { path } => path.to_string_lossy().into_owned(),
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.connection_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub storage: Storage,
    pub pool: pool::Config,
}
