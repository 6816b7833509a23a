// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::track::schema::*;

diesel::table! {
    timeline_item (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        row_updated_ms -> BigInt,
        entity_uid -> Binary,
        track_id -> BigInt,
        kind -> Text,
        start_secs -> Double,
        duration_secs -> Double,
        offset_secs -> Double,
        audio_url -> Text,
        created_by -> Binary,
        added_at_ms -> BigInt,
        gen_chords -> Nullable<Text>,
        gen_instrument -> Nullable<Text>,
        gen_style -> Nullable<Text>,
        gen_tempo_bpm -> Nullable<Double>,
        gen_key -> Nullable<Text>,
        gen_provider -> Nullable<Text>,
    }
}

diesel::joinable!(timeline_item -> track (track_id));
