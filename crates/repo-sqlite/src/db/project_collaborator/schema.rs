// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::project::schema::*;

diesel::table! {
    project_collaborator (row_id) {
        row_id -> BigInt,
        project_id -> BigInt,
        user_uid -> Binary,
        active -> Bool,
    }
}

diesel::joinable!(project_collaborator -> project (project_id));
