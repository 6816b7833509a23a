// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{timeline::TimelineItemEntity, util::clock::DateTime};

use crate::{prelude::*, track::RecordId as TrackId};

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

pub trait TrackRepo {
    /// Append one item to the track's timeline.
    ///
    /// Items are append-only; existing items are never touched.
    fn append_timeline_item(
        &mut self,
        track_id: TrackId,
        created_at: DateTime,
        created_entity: &TimelineItemEntity,
    ) -> RepoResult<RecordId>;

    fn load_timeline_items(
        &mut self,
        track_id: TrackId,
    ) -> RepoResult<Vec<(RecordHeader, TimelineItemEntity)>>;

    fn count_timeline_items(&mut self, track_id: TrackId) -> RepoResult<usize>;
}
