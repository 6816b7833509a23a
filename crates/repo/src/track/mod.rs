// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    track::{TrackEntity, TrackKind},
    util::clock::DateTime,
};

use crate::{prelude::*, project::RecordId as ProjectId};

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

pub trait ProjectRepo {
    fn insert_project_track(
        &mut self,
        project_id: ProjectId,
        created_at: DateTime,
        created_entity: &TrackEntity,
    ) -> RepoResult<RecordId>;

    /// Insert a track unless one of the same kind already exists.
    ///
    /// Idempotent: returns `None` when the kind's uniqueness constraint
    /// suppressed the insert. Concurrent callers converge on the
    /// already existing record.
    fn insert_project_track_if_absent(
        &mut self,
        project_id: ProjectId,
        created_at: DateTime,
        created_entity: &TrackEntity,
    ) -> RepoResult<Option<RecordId>>;

    fn find_project_track_by_kind(
        &mut self,
        project_id: ProjectId,
        kind: TrackKind,
    ) -> RepoResult<Option<(RecordHeader, TrackEntity)>>;

    fn load_project_tracks(
        &mut self,
        project_id: ProjectId,
    ) -> RepoResult<Vec<(RecordHeader, TrackEntity)>>;
}
