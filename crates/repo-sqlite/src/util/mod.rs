// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    entity::EntityUid,
    music::chord::ChordName,
    util::clock::{DateTime, TimestampMillis},
};

pub(crate) fn entity_uid_from_sql(bytes: &[u8]) -> anyhow::Result<EntityUid> {
    EntityUid::try_from_slice(bytes)
        .map_err(|_| anyhow::anyhow!("invalid entity uid: {len} byte(s)", len = bytes.len()))
}

pub(crate) fn timestamp_millis_from_sql(timestamp_millis: TimestampMillis) -> DateTime {
    DateTime::from_timestamp_millis(timestamp_millis)
}

/// Chord progressions are persisted as a JSON string array.
pub(crate) fn chords_to_sql(chords: &[ChordName]) -> anyhow::Result<String> {
    serde_json::to_string(chords).map_err(Into::into)
}

pub(crate) fn chords_from_sql(json: &str) -> anyhow::Result<Vec<ChordName>> {
    serde_json::from_str(json).map_err(Into::into)
}
