// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Storage-agnostic domain model of the MelodyHub backend.

pub mod entity;
pub mod music;
pub mod project;
pub mod timeline;
pub mod track;
pub mod util;

pub mod prelude {
    pub(crate) use semval::prelude::*;
}
