// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

use melodyhub_core::{
    entity::UserUid,
    music::{key::KeySignature, tempo::TempoBpm},
    project::{Project, ProjectUid},
};
use melodyhub_repo::{timeline::TrackRepo as _, track::ProjectRepo as _};
use melodyhub_repo_sqlite::{Connection, DbConnection};
use melodyhub_usecases as uc;

use super::{
    view::{ProjectBody, TimelineItemBody, TrackBody},
    Result,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRequestBody {
    pub(crate) title: String,
    pub(crate) tempo: Option<f64>,
    pub(crate) key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateResponseData {
    pub(crate) project: ProjectBody,
}

pub(crate) fn handle_create(
    connection: &mut DbConnection,
    created_by: UserUid,
    request_body: CreateRequestBody,
) -> Result<CreateResponseData> {
    let CreateRequestBody { title, tempo, key } = request_body;
    let project = Project {
        title,
        created_by,
        collaborators: vec![],
        tempo: tempo.map_or(uc::project::DEFAULT_TEMPO, TempoBpm::new),
        key: key.map_or_else(|| KeySignature::from(uc::project::DEFAULT_KEY), KeySignature::from),
    };
    let entity = uc::project::create_entity(project)?;
    let mut repo = Connection::new(connection);
    uc::project::store_created_entity(&mut repo, &entity)?;
    Ok(CreateResponseData {
        project: entity.into(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoadResponseData {
    pub(crate) project: ProjectBody,
    pub(crate) tracks: Vec<TrackBody>,
}

pub(crate) fn handle_load(
    connection: &mut DbConnection,
    user: UserUid,
    uid: ProjectUid,
) -> Result<LoadResponseData> {
    let mut repo = Connection::new(connection);
    let (record_header, entity) = uc::project::load_entity(&mut repo, &uid)?;
    uc::project::authorize_access(&entity.body, &user)?;
    let mut tracks = vec![];
    for (track_header, track_entity) in repo.load_project_tracks(record_header.id)? {
        let items: Vec<TimelineItemBody> = repo
            .load_timeline_items(track_header.id)?
            .into_iter()
            .map(|(_item_header, item_entity)| item_entity.into())
            .collect();
        tracks.push(TrackBody::new(track_entity, items));
    }
    Ok(LoadResponseData {
        project: entity.into(),
        tracks,
    })
}
