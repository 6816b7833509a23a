// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    track::{TrackEntity, TrackKind, TrackUid},
    util::clock::DateTime,
};
use melodyhub_repo::{
    project::RecordId as ProjectId,
    track::{ProjectRepo, RecordHeader, RecordId},
};

use crate::{
    db::track::{models::*, schema::*},
    prelude::*,
};

fn resolve_track_id(connection: &mut DbConnection, uid: &TrackUid) -> RepoResult<RecordId> {
    track::table
        .select(track::row_id)
        .filter(track::entity_uid.eq(uid.as_bytes().as_slice()))
        .first::<RowId>(connection)
        .map_err(repo_error)
        .map(Into::into)
}

fn decode_record(record: QueryableRecord) -> RepoResult<(RecordHeader, TrackEntity)> {
    let (header, _project_id, entity): (RecordHeader, ProjectId, TrackEntity) =
        record.try_into()?;
    Ok((header, entity))
}

impl ProjectRepo for Connection<'_> {
    fn insert_project_track(
        &mut self,
        project_id: ProjectId,
        created_at: DateTime,
        created_entity: &TrackEntity,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(project_id, created_at, created_entity);
        let query = diesel::insert_into(track::table).values(&insertable);
        let rows_affected = query.execute(self.as_mut()).map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        resolve_track_id(self.as_mut(), &created_entity.uid)
    }

    fn insert_project_track_if_absent(
        &mut self,
        project_id: ProjectId,
        created_at: DateTime,
        created_entity: &TrackEntity,
    ) -> RepoResult<Option<RecordId>> {
        let insertable = InsertableRecord::bind(project_id, created_at, created_entity);
        // The partial unique index on the track kind suppresses the
        // insert when a conflicting record already exists.
        let query = diesel::insert_or_ignore_into(track::table).values(&insertable);
        let rows_affected = query.execute(self.as_mut()).map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Ok(None);
        }
        resolve_track_id(self.as_mut(), &created_entity.uid).map(Some)
    }

    fn find_project_track_by_kind(
        &mut self,
        project_id: ProjectId,
        kind: TrackKind,
    ) -> RepoResult<Option<(RecordHeader, TrackEntity)>> {
        track::table
            .filter(track::project_id.eq(RowId::from(project_id)))
            .filter(track::kind.eq(kind.as_str()))
            .order_by(track::row_id)
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .and_then(decode_record)
            .optional()
    }

    fn load_project_tracks(
        &mut self,
        project_id: ProjectId,
    ) -> RepoResult<Vec<(RecordHeader, TrackEntity)>> {
        track::table
            .filter(track::project_id.eq(RowId::from(project_id)))
            .order_by(track::row_id)
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(decode_record)
            .collect()
    }
}

#[cfg(test)]
mod tests;
