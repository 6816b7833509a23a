// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! JSON views of the domain model.

use serde::Serialize;
use url::Url;

use melodyhub_core::{
    entity::{EntityUid, UserUid},
    music::{chord::ChordName, key::KeySignature, tempo::TempoBpm},
    project::{Collaborator, ProjectEntity},
    timeline::{GenerationMetadata, ItemKind, TimelineItemEntity},
    track::{TrackEntity, TrackKind},
    util::clock::DateTime,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CollaboratorBody {
    pub(crate) uid: UserUid,
    pub(crate) active: bool,
}

impl From<Collaborator> for CollaboratorBody {
    fn from(from: Collaborator) -> Self {
        let Collaborator { uid, active } = from;
        Self { uid, active }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectBody {
    pub(crate) uid: EntityUid,
    pub(crate) title: String,
    pub(crate) created_by: UserUid,
    pub(crate) collaborators: Vec<CollaboratorBody>,
    pub(crate) tempo: TempoBpm,
    pub(crate) key: KeySignature,
}

impl From<ProjectEntity> for ProjectBody {
    fn from(from: ProjectEntity) -> Self {
        let uid = from.uid;
        let body = from.body;
        Self {
            uid,
            title: body.title,
            created_by: body.created_by,
            collaborators: body.collaborators.into_iter().map(Into::into).collect(),
            tempo: body.tempo,
            key: body.key,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackBody {
    pub(crate) uid: EntityUid,
    pub(crate) title: String,
    #[serde(rename = "trackType")]
    pub(crate) kind: TrackKind,
    pub(crate) volume: f64,
    pub(crate) pan: f64,
    pub(crate) muted: bool,
    pub(crate) solo: bool,
    pub(crate) items: Vec<TimelineItemBody>,
}

impl TrackBody {
    pub(crate) fn new(entity: TrackEntity, items: Vec<TimelineItemBody>) -> Self {
        let uid = entity.uid;
        let body = entity.body;
        Self {
            uid,
            title: body.title,
            kind: body.kind,
            volume: body.mixer.volume,
            pan: body.mixer.pan,
            muted: body.mixer.muted,
            solo: body.mixer.solo,
            items,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationBody {
    pub(crate) chords: Vec<ChordName>,
    pub(crate) instrument: String,
    pub(crate) style: String,
    pub(crate) tempo: TempoBpm,
    pub(crate) key: KeySignature,
    pub(crate) provider: String,
}

impl From<GenerationMetadata> for GenerationBody {
    fn from(from: GenerationMetadata) -> Self {
        let GenerationMetadata {
            chords,
            instrument,
            style,
            tempo,
            key,
            provider,
        } = from;
        Self {
            chords,
            instrument,
            style,
            tempo,
            key,
            provider,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimelineItemBody {
    pub(crate) uid: EntityUid,
    #[serde(rename = "type")]
    pub(crate) kind: ItemKind,
    pub(crate) start_time: f64,
    pub(crate) duration: f64,
    pub(crate) offset: f64,
    pub(crate) audio_url: Url,
    pub(crate) created_by: UserUid,
    pub(crate) added_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generation: Option<GenerationBody>,
}

impl From<TimelineItemEntity> for TimelineItemBody {
    fn from(from: TimelineItemEntity) -> Self {
        let uid = from.uid;
        let body = from.body;
        Self {
            uid,
            kind: body.kind,
            start_time: body.start_secs,
            duration: body.duration_secs,
            offset: body.offset_secs,
            audio_url: body.audio_url,
            created_by: body.created_by,
            added_at: body.added_at,
            generation: body.generation.map(Into::into),
        }
    }
}
