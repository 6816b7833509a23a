// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::Validate as _;
use url::Url;

use melodyhub_core::{
    entity::{EntityUid, UserUid},
    music::{chord::ChordName, key::KeySignature, tempo::TempoBpm},
    project::Project,
    timeline::{GenerationMetadata, ItemKind, TimelineItem, TimelineItemEntity},
    util::clock::DateTime,
};
use melodyhub_repo::{
    timeline::{RecordId, TrackRepo},
    track::RecordId as TrackId,
};

use crate::{InputResult, Result};

pub mod prompt;

/// Provider tag recorded with every generated timeline item.
pub const PROVIDER: &str = "suno";

pub const DEFAULT_INSTRUMENT: &str = "Piano";
pub const DEFAULT_STYLE: &str = "Pop";
pub const DEFAULT_DURATION_SECS: f64 = 30.0;

/// Raw generation request parameters as submitted by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub chords: Vec<ChordName>,
    pub instrument: Option<String>,
    pub style: Option<String>,
    pub tempo: Option<TempoBpm>,
    pub key: Option<KeySignature>,
    pub duration_secs: Option<f64>,
}

#[derive(Debug)]
pub struct ValidatedParams(Params);

/// Reject malformed parameters before any network call is issued.
pub fn validate_params(params: Params) -> InputResult<ValidatedParams> {
    if params.chords.is_empty() {
        return Err(anyhow::anyhow!("empty chord progression").into());
    }
    for chord in &params.chords {
        if let Err(err) = chord.validate() {
            return Err(anyhow::anyhow!("invalid chord name \"{chord}\": {err:?}").into());
        }
    }
    if let Some(tempo) = &params.tempo {
        if let Err(err) = tempo.validate() {
            return Err(anyhow::anyhow!("invalid tempo: {err:?}").into());
        }
    }
    if let Some(key) = &params.key {
        if let Err(err) = key.validate() {
            return Err(anyhow::anyhow!("invalid key signature: {err:?}").into());
        }
    }
    if let Some(duration_secs) = params.duration_secs {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(anyhow::anyhow!("invalid duration: {duration_secs}").into());
        }
    }
    Ok(ValidatedParams(params))
}

/// Prompt inputs with all defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptParams {
    pub chords: Vec<ChordName>,
    pub instrument: String,
    pub style: String,
    pub tempo: TempoBpm,
    pub key: KeySignature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub prompt_params: PromptParams,
    pub duration_secs: f64,
}

/// Fill omitted parameters from the project's defaults.
#[must_use]
pub fn resolve_request(validated: ValidatedParams, project: &Project) -> ResolvedRequest {
    let ValidatedParams(params) = validated;
    let Params {
        chords,
        instrument,
        style,
        tempo,
        key,
        duration_secs,
    } = params;
    ResolvedRequest {
        prompt_params: PromptParams {
            chords,
            instrument: instrument.unwrap_or_else(|| DEFAULT_INSTRUMENT.to_owned()),
            style: style.unwrap_or_else(|| DEFAULT_STYLE.to_owned()),
            tempo: tempo.unwrap_or(project.tempo),
            key: key.unwrap_or_else(|| project.key.clone()),
        },
        duration_secs: duration_secs.unwrap_or(DEFAULT_DURATION_SECS),
    }
}

#[must_use]
pub fn generation_metadata(prompt_params: PromptParams) -> GenerationMetadata {
    let PromptParams {
        chords,
        instrument,
        style,
        tempo,
        key,
    } = prompt_params;
    GenerationMetadata {
        chords,
        instrument,
        style,
        tempo,
        key,
        provider: PROVIDER.to_owned(),
    }
}

/// Persist the outcome of a finished generation as a new timeline item.
///
/// Appends exactly one item with zero start and offset, never touching
/// prior items.
pub fn append_generated_item<Repo>(
    repo: &mut Repo,
    track_id: TrackId,
    created_by: UserUid,
    audio_url: Url,
    duration_secs: f64,
    metadata: GenerationMetadata,
) -> Result<(RecordId, TimelineItemEntity)>
where
    Repo: TrackRepo,
{
    let item = TimelineItem {
        kind: ItemKind::Audio,
        start_secs: 0.0,
        duration_secs,
        offset_secs: 0.0,
        audio_url,
        created_by,
        added_at: DateTime::now_utc(),
        generation: Some(metadata),
    };
    if let Err(err) = item.validate() {
        return Err(anyhow::anyhow!("invalid generated timeline item: {err:?}").into());
    }
    let entity = TimelineItemEntity::new(EntityUid::random(), item);
    let id = repo.append_timeline_item(track_id, DateTime::now_utc(), &entity)?;
    log::debug!("Appended generated timeline item {uid}", uid = entity.uid);
    Ok((id, entity))
}

#[cfg(test)]
mod tests;
