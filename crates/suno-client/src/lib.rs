// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! HTTP client for the Suno generation service.
//!
//! One generation is a two-step conversation: a start request that
//! returns a generation id, followed by bounded polling of the status
//! endpoint until the rendition is complete.

use std::fmt;

use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub mod poll;

use poll::{PollOutcome, RetryPolicy};

#[derive(Error, Debug)]
pub enum Error {
    /// No API credential is configured. Fatal, never retried.
    #[error("missing API credential")]
    MissingCredential,

    #[error("generation service responded with {status}: {message}")]
    UpstreamStatus { status: StatusCode, message: String },

    #[error("generation failed: {message}")]
    GenerationFailed { message: String },

    #[error("generation timed out after {attempts} attempt(s)")]
    Timeout { attempts: u32 },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Hard upper bound of the upstream service for a single rendition.
pub const MAX_DURATION_SECS: f64 = 30.0;

pub const DEFAULT_DURATION_SECS: f64 = 30.0;

#[must_use]
pub fn clamp_duration_secs(duration_secs: f64) -> f64 {
    duration_secs.min(MAX_DURATION_SECS)
}

pub const DEFAULT_API_BASE_URL: &str = "https://studio-api.suno.ai/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: Url,

    /// Bearer credential for the upstream API.
    ///
    /// Requests fail with [`Error::MissingCredential`] while unset.
    pub api_key: Option<String>,

    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.parse().expect("valid URL"),
            api_key: None,
            retry: Default::default(),
        }
    }
}

/// Upstream handle of a generation in progress.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationId(String);

impl GenerationId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        let Self(id) = self;
        id
    }
}

impl From<String> for GenerationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal payload of a completed generation.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedAudio {
    pub audio_url: Url,
    pub duration_secs: f64,
}

#[derive(Debug, Serialize)]
struct StartGenerationRequestBody<'a> {
    prompt: &'a str,
    duration_seconds: f64,
    instrumental: bool,
}

#[derive(Debug, Deserialize)]
struct StartGenerationResponseBody {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponseBody {
    status: String,
    audio_url: Option<Url>,
    duration_seconds: Option<f64>,
    message: Option<String>,
}

const STATUS_COMPLETE: &str = "complete";
const STATUS_FAILED: &str = "failed";

fn decode_status(response_body: StatusResponseBody) -> Result<PollOutcome> {
    let StatusResponseBody {
        status,
        audio_url,
        duration_seconds,
        message,
    } = response_body;
    match status.as_str() {
        STATUS_COMPLETE => {
            let (Some(audio_url), Some(duration_secs)) = (audio_url, duration_seconds) else {
                return Err(anyhow::anyhow!(
                    "completed generation without audio url or duration"
                )
                .into());
            };
            Ok(PollOutcome::Ready(GeneratedAudio {
                audio_url,
                duration_secs,
            }))
        }
        STATUS_FAILED => Ok(PollOutcome::Failed {
            message: message.unwrap_or_else(|| "unknown reason".to_owned()),
        }),
        _ => Ok(PollOutcome::Pending),
    }
}

/// Fold non-success responses into an error carrying the upstream message.
async fn check_response_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let bytes = response.bytes().await.unwrap_or_default();
    let message = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(json) => json
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| json.to_string(), ToOwned::to_owned),
        Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
    };
    Err(Error::UpstreamStatus { status, message })
}

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    config: Config,
}

impl Client {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            http: HttpClient::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn api_key(&self) -> Result<&str> {
        match self.config.api_key.as_deref() {
            Some(api_key) if !api_key.trim().is_empty() => Ok(api_key),
            _ => Err(Error::MissingCredential),
        }
    }

    fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.config
            .api_base_url
            .join(path)
            .map_err(|err| anyhow::Error::from(err).into())
    }

    /// Kick off a generation and return its upstream id.
    ///
    /// The requested duration is clamped to [`MAX_DURATION_SECS`] and
    /// the rendition is always requested instrumental-only.
    pub async fn start_generation(
        &self,
        prompt: &str,
        duration_secs: f64,
    ) -> Result<GenerationId> {
        let api_key = self.api_key()?;
        let url = self.endpoint_url("api/generate")?;
        let request_body = StartGenerationRequestBody {
            prompt,
            duration_seconds: clamp_duration_secs(duration_secs),
            instrumental: true,
        };
        log::debug!("Starting generation: {prompt}");
        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;
        let response = check_response_status(response).await?;
        let response_body: StartGenerationResponseBody = response.json().await?;
        log::debug!("Generation started: {id}", id = response_body.id);
        Ok(GenerationId::from(response_body.id))
    }

    async fn fetch_status(&self, id: &GenerationId) -> Result<PollOutcome> {
        let api_key = self.api_key()?;
        let url = self.endpoint_url(&format!("api/generate/{id}"))?;
        let response = self.http.get(url).bearer_auth(api_key).send().await?;
        let response = check_response_status(response).await?;
        let response_body: StatusResponseBody = response.json().await?;
        decode_status(response_body)
    }

    /// Poll the status endpoint until the generation terminates.
    ///
    /// There is no cancellation once polling has started. The loop
    /// runs until completion, explicit failure, or exhaustion of the
    /// configured retry policy.
    pub async fn await_completion(&self, id: &GenerationId) -> Result<GeneratedAudio> {
        poll::poll_until_terminal(&self.config.retry, || self.fetch_status(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_duration() {
        assert_eq!(16.0, clamp_duration_secs(16.0));
        assert_eq!(MAX_DURATION_SECS, clamp_duration_secs(MAX_DURATION_SECS));
        assert_eq!(MAX_DURATION_SECS, clamp_duration_secs(45.0));
    }

    #[test]
    fn missing_credential() {
        let client = Client::new(Config::default());
        assert!(matches!(client.api_key(), Err(Error::MissingCredential)));

        let client = Client::new(Config {
            api_key: Some(" ".to_owned()),
            ..Default::default()
        });
        assert!(matches!(client.api_key(), Err(Error::MissingCredential)));
    }

    #[test]
    fn decode_complete_status() {
        let outcome = decode_status(StatusResponseBody {
            status: "complete".to_owned(),
            audio_url: Some("https://cdn.example.com/audio.mp3".parse().unwrap()),
            duration_seconds: Some(30.0),
            message: None,
        })
        .unwrap();
        assert!(matches!(outcome, PollOutcome::Ready(_)));
    }

    #[test]
    fn decode_complete_status_without_audio_fails() {
        assert!(decode_status(StatusResponseBody {
            status: "complete".to_owned(),
            audio_url: None,
            duration_seconds: None,
            message: None,
        })
        .is_err());
    }

    #[test]
    fn decode_non_terminal_status() {
        let outcome = decode_status(StatusResponseBody {
            status: "processing".to_owned(),
            audio_url: None,
            duration_seconds: None,
            message: None,
        })
        .unwrap();
        assert_eq!(PollOutcome::Pending, outcome);
    }
}
