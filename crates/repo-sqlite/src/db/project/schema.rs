// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    project (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        row_updated_ms -> BigInt,
        entity_uid -> Binary,
        title -> Text,
        created_by -> Binary,
        tempo_bpm -> Double,
        key_signature -> Text,
    }
}
