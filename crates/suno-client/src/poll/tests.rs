// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use reqwest::StatusCode;

use super::*;

fn zero_delay_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts: NonZeroU32::new(max_attempts).unwrap(),
        delay_millis: 0,
    }
}

fn ready_outcome() -> PollOutcome {
    PollOutcome::Ready(GeneratedAudio {
        audio_url: "https://cdn.example.com/audio.mp3".parse().unwrap(),
        duration_secs: 30.0,
    })
}

#[tokio::test]
async fn returns_payload_on_first_complete_response() {
    let outcomes = RefCell::new(VecDeque::from([
        PollOutcome::Pending,
        PollOutcome::Pending,
        ready_outcome(),
    ]));
    let attempts = Cell::new(0u32);

    let result = poll_until_terminal(&zero_delay_policy(30), || {
        attempts.set(attempts.get() + 1);
        let outcome = outcomes
            .borrow_mut()
            .pop_front()
            .expect("no poll after terminal response");
        async move { Ok(outcome) }
    })
    .await;

    assert!(result.is_ok());
    assert_eq!(3, attempts.get());
    assert!(outcomes.borrow().is_empty());
}

#[tokio::test]
async fn fails_immediately_on_failed_status() {
    // The trailing outcome must never be polled.
    let outcomes = RefCell::new(VecDeque::from([
        PollOutcome::Pending,
        PollOutcome::Failed {
            message: "no credits left".to_owned(),
        },
        ready_outcome(),
    ]));
    let attempts = Cell::new(0u32);

    let result = poll_until_terminal(&zero_delay_policy(30), || {
        attempts.set(attempts.get() + 1);
        let outcome = outcomes.borrow_mut().pop_front().unwrap();
        async move { Ok(outcome) }
    })
    .await;

    assert!(matches!(result, Err(Error::GenerationFailed { .. })));
    assert_eq!(2, attempts.get());
    assert_eq!(1, outcomes.borrow().len());
}

#[tokio::test]
async fn times_out_after_max_attempts() {
    let attempts = Cell::new(0u32);

    let result = poll_until_terminal(&zero_delay_policy(5), || {
        attempts.set(attempts.get() + 1);
        async { Ok(PollOutcome::Pending) }
    })
    .await;

    assert!(matches!(result, Err(Error::Timeout { attempts: 5 })));
    assert_eq!(5, attempts.get());
}

#[tokio::test]
async fn propagates_fetch_errors() {
    let attempts = Cell::new(0u32);

    let result = poll_until_terminal(&zero_delay_policy(30), || {
        attempts.set(attempts.get() + 1);
        async {
            Err(Error::UpstreamStatus {
                status: StatusCode::BAD_GATEWAY,
                message: "upstream unavailable".to_owned(),
            })
        }
    })
    .await;

    assert!(matches!(result, Err(Error::UpstreamStatus { .. })));
    assert_eq!(1, attempts.get());
}
