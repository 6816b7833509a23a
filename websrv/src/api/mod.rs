// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    convert::Infallible,
    error::Error as StdError,
    result::Result as StdResult,
    sync::{atomic::AtomicBool, Arc},
};

use serde::Serialize;
use thiserror::Error;
use warp::{
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{self, InvalidHeader, InvalidQuery, MethodNotAllowed, Reject, Rejection},
    Reply,
};

use melodyhub_repo::prelude::RepoError;
use melodyhub_storage_sqlite::{
    self as db,
    connection::pool::{gatekeeper::Gatekeeper, PooledConnection},
};
use melodyhub_suno_client as suno;
use melodyhub_usecases as uc;

pub(crate) mod generation;
pub(crate) mod project;
pub(crate) mod view;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("generation service error: {0}")]
    Upstream(String),

    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("generation timed out: {0}")]
    GenerationTimeout(String),

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("timeout: {reason}")]
    Timeout { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Stable error tag for the JSON envelope.
    const fn tag(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "validation",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "authorization",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Configuration(_) => "configuration",
            Self::Upstream(_) => "upstream",
            Self::GenerationFailed(_) => "generation_failed",
            Self::GenerationTimeout(_) => "generation_timeout",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Timeout { .. } => "timeout",
            Self::Other(_) => "internal",
        }
    }

    const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Configuration(_)
            | Self::Upstream(_)
            | Self::GenerationFailed(_)
            | Self::GenerationTimeout(_)
            | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            RepoError::Conflict => Self::Conflict,
            RepoError::Aborted => Self::ServiceUnavailable,
            RepoError::Other(err) => Self::Other(err),
        }
    }
}

impl From<uc::InputError> for Error {
    fn from(err: uc::InputError) -> Self {
        let uc::InputError(err) = err;
        Self::BadRequest(err)
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        use uc::Error::*;
        match err {
            Input(err) => err.into(),
            Forbidden => Self::Forbidden,
            Repository(err) => err.into(),
            Other(err) => Self::Other(err),
        }
    }
}

impl From<db::Error> for Error {
    fn from(err: db::Error) -> Self {
        use db::Error::*;
        match err {
            Database(err) => Self::Other(err.into()),
            DatabaseConnection(err) => Self::Other(err.into()),
            DatabaseConnectionPool(err) => Self::Other(err.into()),
            Closed => Self::ServiceUnavailable,
            TaskTimeout { reason } => Self::Timeout { reason },
            TaskScheduling(err) => Self::Other(err.into()),
            Other(err) => Self::Other(err),
        }
    }
}

impl From<suno::Error> for Error {
    fn from(err: suno::Error) -> Self {
        use suno::Error::*;
        match err {
            MissingCredential => {
                Self::Configuration("missing API credential for the generation service".to_owned())
            }
            UpstreamStatus { status, message } => Self::Upstream(format!("{status}: {message}")),
            GenerationFailed { message } => Self::GenerationFailed(message),
            Timeout { attempts } => {
                Self::GenerationTimeout(format!("no result after {attempts} attempt(s)"))
            }
            Http(err) => Self::Upstream(err.to_string()),
            Other(err) => Self::Other(err),
        }
    }
}

pub(crate) type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

pub(crate) fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

fn after_blocking_task_finished<T, E1, E2>(
    res: StdResult<StdResult<T, E1>, E2>,
) -> StdResult<T, Rejection>
where
    E1: Into<Error>,
    E2: Into<Error>,
{
    res.map_err(reject_on_error)
        .and_then(|res| res.map_err(reject_on_error))
}

pub(crate) async fn spawn_blocking_write_task<H, T, E>(
    gatekeeper: &Gatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection, Arc<AtomicBool>) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_write_task(handler).await)
}

pub(crate) async fn spawn_blocking_read_task<H, T, E>(
    gatekeeper: &Gatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection, Arc<AtomicBool>) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_read_task(handler).await)
}

/// Envelope of every successful response.
#[derive(Debug, Serialize)]
pub(crate) struct SuccessResponseBody<T> {
    success: bool,
    data: T,
}

impl<T> SuccessResponseBody<T> {
    pub(crate) const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope of every failed response.
#[derive(Debug, Serialize)]
struct ErrorResponseBody {
    success: bool,
    message: String,
    error: &'static str,
}

fn error_response(code: StatusCode, message: String, error: &'static str) -> impl Reply {
    let json_reply = warp::reply::json(&ErrorResponseBody {
        success: false,
        message,
        error,
    });
    warp::reply::with_status(json_reply, code)
}

#[allow(clippy::unused_async)] // async needed for warp filter
pub(crate) async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let code;
    let message;
    let error;

    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "not found".to_owned();
        error = "not_found";
    } else if let Some(err) = reject.find::<InvalidHeader>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
        error = "validation";
    } else if let Some(err) = reject.find::<InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
        error = "validation";
    } else if let Some(err) = reject.find::<BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
        error = "validation";
    } else if let Some(err) = reject.find::<Error>() {
        code = err.status_code();
        message = err.to_string();
        error = err.tag();
    } else if let Some(err) = reject.find::<MethodNotAllowed>() {
        // This must have the least priority, because most rejections
        // contain a MethodNotAllowed element!
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = err.to_string();
        error = "method_not_allowed";
    } else {
        log::error!("Unhandled rejection {reject:?}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = format!("{reject:?}");
        error = "internal";
    }

    Ok(error_response(code, message, error))
}
