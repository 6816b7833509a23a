// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

pub(crate) mod project;
pub(crate) mod project_collaborator;
pub(crate) mod timeline_item;
pub(crate) mod track;

mod join {
    use crate::db::{
        project::schema::*, project_collaborator::schema::*, timeline_item::schema::*,
        track::schema::*,
    };

    diesel::allow_tables_to_appear_in_same_query!(
        project,
        project_collaborator,
        track,
        timeline_item,
    );
}
