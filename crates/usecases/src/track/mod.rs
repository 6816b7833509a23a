// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    entity::EntityUid,
    track::{Track, TrackEntity, TrackKind},
    util::clock::DateTime,
};
use melodyhub_repo::{
    project::RecordId as ProjectId,
    track::{ProjectRepo, RecordId},
};

use crate::Result;

/// Find the project's backing track, lazily creating it on first use.
///
/// The check-then-create is not transactional. Creation goes through
/// the idempotent insert-if-absent primitive, so a concurrent first
/// request on the same project converges on the winner's record
/// instead of creating a duplicate.
pub fn resolve_backing_track<Repo>(
    repo: &mut Repo,
    project_id: ProjectId,
) -> Result<(RecordId, TrackEntity)>
where
    Repo: ProjectRepo,
{
    if let Some((header, entity)) = repo.find_project_track_by_kind(project_id, TrackKind::Backing)?
    {
        return Ok((header.id, entity));
    }

    let created_entity = TrackEntity::new(EntityUid::random(), Track::new_backing());
    let created_at = DateTime::now_utc();
    if let Some(id) = repo.insert_project_track_if_absent(project_id, created_at, &created_entity)?
    {
        log::debug!("Created backing track {uid}", uid = created_entity.uid);
        return Ok((id, created_entity));
    }

    // Lost the race, the winner's record must exist by now.
    let (header, entity) = repo
        .find_project_track_by_kind(project_id, TrackKind::Backing)?
        .ok_or_else(|| anyhow::anyhow!("backing track vanished"))?;
    Ok((header.id, entity))
}
