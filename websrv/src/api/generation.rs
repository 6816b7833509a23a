// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};
use url::Url;

use melodyhub_core::{
    entity::UserUid,
    music::{chord::ChordName, key::KeySignature, tempo::TempoBpm},
    project::ProjectUid,
};
use melodyhub_repo::track::RecordId as TrackId;
use melodyhub_repo_sqlite::{Connection, DbConnection};
use melodyhub_suno_client::GeneratedAudio;
use melodyhub_usecases as uc;

use super::{view::TimelineItemBody, Result};

/// Chord list entries arrive either as bare names or as objects with
/// a `chordName` field, depending on the client version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ChordInput {
    Name(String),
    Object {
        #[serde(rename = "chordName")]
        chord_name: String,
    },
}

impl From<ChordInput> for ChordName {
    fn from(from: ChordInput) -> Self {
        match from {
            ChordInput::Name(name) | ChordInput::Object { chord_name: name } => name.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestBody {
    pub(crate) chords: Vec<ChordInput>,
    pub(crate) instrument: Option<String>,
    pub(crate) style: Option<String>,
    pub(crate) tempo: Option<f64>,
    pub(crate) key: Option<String>,
    pub(crate) duration: Option<f64>,
}

impl From<RequestBody> for uc::generation::Params {
    fn from(from: RequestBody) -> Self {
        let RequestBody {
            chords,
            instrument,
            style,
            tempo,
            key,
            duration,
        } = from;
        Self {
            chords: chords.into_iter().map(Into::into).collect(),
            instrument,
            style,
            tempo: tempo.map(TempoBpm::new),
            key: key.map(KeySignature::from),
            duration_secs: duration,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseData {
    #[serde(rename = "timelineItem")]
    pub(crate) timeline_item: TimelineItemBody,
    pub(crate) audio_url: Url,
    pub(crate) duration: f64,
}

/// Everything the upstream generation call needs, assembled while the
/// database connection was held.
#[derive(Debug)]
pub(crate) struct PreparedGeneration {
    pub(crate) track_id: TrackId,
    pub(crate) prompt: String,
    pub(crate) duration_secs: f64,
    pub(crate) prompt_params: uc::generation::PromptParams,
}

/// First database hop: validate, authorize, and resolve the backing
/// track before any network call is issued.
pub(crate) fn handle_prepare(
    connection: &mut DbConnection,
    user: UserUid,
    project_uid: ProjectUid,
    request_body: RequestBody,
) -> Result<PreparedGeneration> {
    let validated = uc::generation::validate_params(request_body.into())?;
    let mut repo = Connection::new(connection);
    let (record_header, project_entity) = uc::project::load_entity(&mut repo, &project_uid)?;
    uc::project::authorize_access(&project_entity.body, &user)?;
    let (track_id, _track_entity) = uc::track::resolve_backing_track(&mut repo, record_header.id)?;
    let resolved = uc::generation::resolve_request(validated, &project_entity.body);
    let prompt = uc::generation::prompt::build_backing_prompt(&resolved.prompt_params);
    Ok(PreparedGeneration {
        track_id,
        prompt,
        duration_secs: resolved.duration_secs,
        prompt_params: resolved.prompt_params,
    })
}

/// Second database hop: persist the finished generation as a new
/// timeline item. Skipped entirely when the generation fails, so no
/// partial item is ever visible.
pub(crate) fn handle_persist(
    connection: &mut DbConnection,
    user: UserUid,
    track_id: TrackId,
    prompt_params: uc::generation::PromptParams,
    generated: GeneratedAudio,
) -> Result<ResponseData> {
    let GeneratedAudio {
        audio_url,
        duration_secs,
    } = generated;
    let metadata = uc::generation::generation_metadata(prompt_params);
    let mut repo = Connection::new(connection);
    let (_record_id, entity) = uc::generation::append_generated_item(
        &mut repo,
        track_id,
        user,
        audio_url.clone(),
        duration_secs,
        metadata,
    )?;
    Ok(ResponseData {
        timeline_item: entity.into(),
        audio_url,
        duration: duration_secs,
    })
}
