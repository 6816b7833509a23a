// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    ops::Deref,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    task::spawn_blocking,
    time::sleep,
};

use crate::{Error, Result};

use super::{get_pooled_connection, ConnectionPool, PooledConnection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub acquire_read_timeout_millis: NonZeroU64,
    pub acquire_write_timeout_millis: NonZeroU64,
}

/// Explicitly owned handle that manages database connections for
/// asynchronous tasks.
///
/// Only a single writer is allowed to access the SQLite database at
/// any given time while readers may run in parallel. This prevents
/// both synchronous locking when obtaining a connection and timeouts
/// when concurrently executing write operations on a shared database.
///
/// The handle is constructed once, passed to all consumers by
/// reference, and closed on shutdown. Tasks dispatched after
/// [`Gatekeeper::close`] fail with [`Error::Closed`].
#[allow(missing_debug_implementations)]
pub struct Gatekeeper {
    connection_pool: Arc<RwLock<ConnectionPool>>,
    acquire_read_timeout: Duration,
    acquire_write_timeout: Duration,
    pending_counters: Arc<PendingCounters>,
    abort_current_task_flag: Arc<AtomicBool>,
    closed: AtomicBool,
}

#[derive(Debug, Default)]
struct PendingCounters {
    read: AtomicUsize,
    write: AtomicUsize,
}

impl PendingCounters {
    const fn of(&self, mode: AccessMode) -> &AtomicUsize {
        match mode {
            AccessMode::Read => &self.read,
            AccessMode::Write => &self.write,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessMode {
    Read,
    Write,
}

impl AccessMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// Tracks one pending task for the lifetime of the scope.
struct PendingScope {
    counters: Arc<PendingCounters>,
    mode: AccessMode,
}

impl PendingScope {
    fn enter(counters: Arc<PendingCounters>, mode: AccessMode) -> Self {
        let pending_before = counters.of(mode).fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Starting {mode} task: {pending} pending {mode} task(s)",
            mode = mode.as_str(),
            pending = pending_before + 1
        );
        Self { counters, mode }
    }
}

impl Drop for PendingScope {
    fn drop(&mut self) {
        let pending_before = self.counters.of(self.mode).fetch_sub(1, Ordering::Relaxed);
        debug_assert!(pending_before > 0);
        log::debug!(
            "Finished {mode} task: {pending} pending {mode} task(s)",
            mode = self.mode.as_str(),
            pending = pending_before - 1
        );
    }
}

enum PoolGuard<'lock> {
    Read(RwLockReadGuard<'lock, ConnectionPool>),
    Write(RwLockWriteGuard<'lock, ConnectionPool>),
}

impl Deref for PoolGuard<'_> {
    type Target = ConnectionPool;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Read(guard) => guard,
            Self::Write(guard) => guard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTasks {
    pub read: usize,
    pub write: usize,
}

impl Gatekeeper {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: Config) -> Self {
        let Config {
            acquire_read_timeout_millis,
            acquire_write_timeout_millis,
        } = config;
        Self {
            connection_pool: Arc::new(RwLock::new(connection_pool)),
            acquire_read_timeout: Duration::from_millis(acquire_read_timeout_millis.get()),
            acquire_write_timeout: Duration::from_millis(acquire_write_timeout_millis.get()),
            pending_counters: Default::default(),
            abort_current_task_flag: Default::default(),
            closed: AtomicBool::new(false),
        }
    }

    /// Reject all subsequent tasks.
    ///
    /// Already running tasks are not interrupted, see
    /// [`Gatekeeper::abort_current_task`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::Acquire)
    }

    fn check_open(&self) -> Result<()> {
        if !self.is_open() {
            return Err(Error::Closed);
        }
        Ok(())
    }

    pub async fn spawn_blocking_read_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection, Arc<AtomicBool>) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.spawn_blocking_task(AccessMode::Read, connection_handler)
            .await
    }

    pub async fn spawn_blocking_write_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection, Arc<AtomicBool>) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.spawn_blocking_task(AccessMode::Write, connection_handler)
            .await
    }

    async fn spawn_blocking_task<H, R>(&self, mode: AccessMode, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection, Arc<AtomicBool>) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_open()?;
        let _pending_scope = PendingScope::enter(Arc::clone(&self.pending_counters), mode);
        let acquire_timeout = match mode {
            AccessMode::Read => self.acquire_read_timeout,
            AccessMode::Write => self.acquire_write_timeout,
        };
        let timeout = sleep(acquire_timeout);
        tokio::pin!(timeout);
        let lock_pool = self.lock_pool(mode);
        tokio::pin!(lock_pool);
        let abort_current_task_flag = Arc::clone(&self.abort_current_task_flag);
        tokio::select! {
            () = &mut timeout => Err(Error::TaskTimeout { reason: "database is locked".to_owned() }),
            guard = &mut lock_pool => {
                self.check_open()?;
                let connection = get_pooled_connection(&guard)?;
                // Every task gets the chance to run when ready
                abort_current_task_flag.store(false, Ordering::Release);
                let joined = spawn_blocking(move || connection_handler(connection, abort_current_task_flag)).await;
                // The pool lock must remain held until the blocking task
                // has finished to uphold the single-writer guarantee.
                drop(guard);
                joined.map_err(Error::TaskScheduling)
            },
        }
    }

    async fn lock_pool(&self, mode: AccessMode) -> PoolGuard<'_> {
        match mode {
            AccessMode::Read => PoolGuard::Read(self.connection_pool.read().await),
            AccessMode::Write => PoolGuard::Write(self.connection_pool.write().await),
        }
    }

    #[must_use]
    pub fn pending_tasks(&self) -> PendingTasks {
        PendingTasks {
            read: self.pending_counters.read.load(Ordering::Relaxed),
            write: self.pending_counters.write.load(Ordering::Relaxed),
        }
    }

    /// Signal the currently running task to abort cooperatively.
    pub fn abort_current_task(&self) {
        self.abort_current_task_flag.store(true, Ordering::Release);
    }
}
