// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, num::NonZeroU32, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::{Error, GeneratedAudio, Result};

/// Bounded fixed-delay retry policy for status polling.
///
/// No exponential backoff and no jitter. Every attempt after the
/// first waits exactly the configured delay, so the worst-case
/// latency stays deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: NonZeroU32,
    pub delay_millis: u64,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
    pub const DEFAULT_DELAY_MILLIS: u64 = 2000;

    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_millis)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: NonZeroU32::new(Self::DEFAULT_MAX_ATTEMPTS).expect("non-zero"),
            delay_millis: Self::DEFAULT_DELAY_MILLIS,
        }
    }
}

/// Outcome of a single status request.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Ready(GeneratedAudio),
    Failed { message: String },
    Pending,
}

/// Drive `fetch_status` until a terminal outcome or policy exhaustion.
///
/// Generic over the fetch future so the loop is testable without HTTP
/// and with a zero-delay policy.
pub(crate) async fn poll_until_terminal<F, Fut>(
    policy: &RetryPolicy,
    mut fetch_status: F,
) -> Result<GeneratedAudio>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollOutcome>>,
{
    let max_attempts = policy.max_attempts.get();
    for attempt in 1..=max_attempts {
        if attempt > 1 {
            sleep(policy.delay()).await;
        }
        match fetch_status().await? {
            PollOutcome::Ready(generated) => return Ok(generated),
            PollOutcome::Failed { message } => return Err(Error::GenerationFailed { message }),
            PollOutcome::Pending => {
                log::debug!("Generation pending: attempt {attempt}/{max_attempts}");
            }
        }
    }
    Err(Error::Timeout {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests;
