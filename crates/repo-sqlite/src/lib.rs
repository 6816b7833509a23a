// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::{
    connection::SimpleConnection as _,
    migration::{MigrationVersion, Result as MigrationResult},
    QueryResult,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness as _};

pub type DbBackend = diesel::sqlite::Sqlite;
pub type DbConnection = diesel::sqlite::SqliteConnection;

pub mod prelude {
    use std::ops::{Deref, DerefMut};

    pub(crate) use diesel::{prelude::*, result::Error as DieselError};
    pub(crate) use melodyhub_repo::{prelude::*, RecordId as RowId};

    pub(crate) use crate::util::*;

    pub use crate::{DbBackend, DbConnection};

    pub use diesel::Connection as _;

    /// Borrowed database connection for the repository trait impls.
    #[allow(missing_debug_implementations)]
    pub struct Connection<'db>(&'db mut DbConnection);

    impl<'db> Connection<'db> {
        pub fn new(inner: &'db mut DbConnection) -> Self {
            Self(inner)
        }
    }

    impl<'db> From<&'db mut DbConnection> for Connection<'db> {
        fn from(inner: &'db mut DbConnection) -> Self {
            Self::new(inner)
        }
    }

    impl AsMut<DbConnection> for Connection<'_> {
        fn as_mut(&mut self) -> &mut DbConnection {
            self.0
        }
    }

    impl Deref for Connection<'_> {
        type Target = DbConnection;

        fn deref(&self) -> &Self::Target {
            self.0
        }
    }

    impl DerefMut for Connection<'_> {
        fn deref_mut(&mut self) -> &mut Self::Target {
            self.as_mut()
        }
    }

    pub(crate) fn repo_error(err: DieselError) -> RepoError {
        use DieselError::*;
        match err {
            NotFound => RepoError::NotFound,
            err => anyhow::Error::from(err).into(),
        }
    }

    #[cfg(test)]
    pub mod tests {
        use diesel::Connection as _;

        use super::DbConnection;

        pub type TestResult<T> = anyhow::Result<T>;

        pub fn establish_connection() -> TestResult<DbConnection> {
            let mut connection =
                DbConnection::establish(":memory:").expect("in-memory database connection");
            crate::initialize_database(&mut connection)?;
            crate::run_migrations(&mut connection)
                .map_err(|err| anyhow::anyhow!(err.to_string()))?;
            Ok(connection)
        }
    }
}

pub use prelude::Connection;

pub mod repo;

mod db;
mod util;

/// Configure the database engine
///
/// The repository implementations rely on a proper configuration of
/// the database engine, e.g. enforcement of foreign key constraints
/// and recursive cascading deletes.
///
/// Some values like the text encoding can only be changed once after
/// the database has initially been created.
pub fn initialize_database(connection: &mut DbConnection) -> QueryResult<()> {
    connection.batch_execute(
        r"
PRAGMA journal_mode = WAL;        -- better write-concurrency
PRAGMA synchronous = NORMAL;      -- fsync only in critical moments, safe for journal_mode = WAL
PRAGMA foreign_keys = 1;          -- check foreign key constraints
PRAGMA defer_foreign_keys = 1;    -- delay enforcement of foreign key constraints until commit
PRAGMA recursive_triggers = 1;    -- for recursive ON CASCADE DELETE actions
PRAGMA encoding = 'UTF-8';
",
    )?;
    Ok(())
}

const EMBEDDED_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn run_migrations(connection: &mut DbConnection) -> MigrationResult<Vec<MigrationVersion<'_>>> {
    connection.run_pending_migrations(EMBEDDED_MIGRATIONS)
}
