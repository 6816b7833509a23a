// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::project::schema::*;

diesel::table! {
    track (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        row_updated_ms -> BigInt,
        entity_uid -> Binary,
        project_id -> BigInt,
        title -> Text,
        kind -> Text,
        volume -> Double,
        pan -> Double,
        muted -> Bool,
        solo -> Bool,
    }
}

diesel::joinable!(track -> project (project_id));
