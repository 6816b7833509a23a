// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    entity::{Entity, EntityUid},
    music::{key::KeySignature, tempo::TempoBpm},
    project::{Project, ProjectEntity},
    track::{Track, TrackEntity},
    util::clock::DateTime,
};
use melodyhub_repo::project::{EntityRepo as _, RecordId as ProjectId};

use crate::{prelude::tests::TestResult, Connection};

pub(crate) fn sample_project_entity() -> ProjectEntity {
    Entity::new(
        EntityUid::random(),
        Project {
            title: "Demo Project".into(),
            created_by: EntityUid::random(),
            collaborators: vec![],
            tempo: TempoBpm::new(120.0),
            key: KeySignature::from("C Major"),
        },
    )
}

pub(crate) fn sample_backing_track_entity() -> TrackEntity {
    Entity::new(EntityUid::random(), Track::new_backing())
}

pub(crate) fn create_project(db: &mut Connection<'_>) -> TestResult<(ProjectId, ProjectEntity)> {
    let entity = sample_project_entity();
    let id = db.insert_project_entity(DateTime::now_utc(), &entity)?;
    Ok((id, entity))
}
