// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Storage-agnostic use case implementations of the MelodyHub backend.

use std::result::Result as StdResult;

use thiserror::Error;

use melodyhub_repo::prelude::RepoError;

pub mod generation;
pub mod project;
pub mod track;

#[derive(Error, Debug)]
#[error(transparent)]
pub struct InputError(#[from] pub anyhow::Error);

pub type InputResult<T> = StdResult<T, InputError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    /// Requesting user is neither the creator nor an active collaborator.
    #[error("forbidden")]
    Forbidden,

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;
