// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    entity::Entity,
    music::{key::KeySignature, tempo::TempoBpm},
    timeline::{GenerationMetadata, TimelineItem, TimelineItemEntity},
    util::clock::{DateTime, TimestampMillis},
};
use melodyhub_repo::{timeline::RecordHeader, track::RecordId as TrackId};

use crate::prelude::*;

use super::schema::*;

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = timeline_item, primary_key(row_id))]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: Vec<u8>,
    pub(crate) track_id: RowId,
    pub(crate) kind: String,
    pub(crate) start_secs: f64,
    pub(crate) duration_secs: f64,
    pub(crate) offset_secs: f64,
    pub(crate) audio_url: String,
    pub(crate) created_by: Vec<u8>,
    pub(crate) added_at_ms: TimestampMillis,
    pub(crate) gen_chords: Option<String>,
    pub(crate) gen_instrument: Option<String>,
    pub(crate) gen_style: Option<String>,
    pub(crate) gen_tempo_bpm: Option<f64>,
    pub(crate) gen_key: Option<String>,
    pub(crate) gen_provider: Option<String>,
}

fn try_decode_generation_metadata(
    gen_chords: Option<String>,
    gen_instrument: Option<String>,
    gen_style: Option<String>,
    gen_tempo_bpm: Option<f64>,
    gen_key: Option<String>,
    gen_provider: Option<String>,
) -> anyhow::Result<Option<GenerationMetadata>> {
    // The provider column decides whether metadata is present. All
    // remaining columns must then be populated as well.
    let Some(provider) = gen_provider else {
        return Ok(None);
    };
    let (Some(chords), Some(instrument), Some(style), Some(tempo_bpm), Some(key)) =
        (gen_chords, gen_instrument, gen_style, gen_tempo_bpm, gen_key)
    else {
        anyhow::bail!("incomplete generation metadata");
    };
    Ok(Some(GenerationMetadata {
        chords: chords_from_sql(&chords)?,
        instrument,
        style,
        tempo: TempoBpm::new(tempo_bpm),
        key: KeySignature::from(key),
        provider,
    }))
}

impl TryFrom<QueryableRecord> for (RecordHeader, TrackId, TimelineItemEntity) {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            row_id,
            row_created_ms,
            row_updated_ms,
            entity_uid,
            track_id,
            kind,
            start_secs,
            duration_secs,
            offset_secs,
            audio_url,
            created_by,
            added_at_ms,
            gen_chords,
            gen_instrument,
            gen_style,
            gen_tempo_bpm,
            gen_key,
            gen_provider,
        } = from;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: timestamp_millis_from_sql(row_created_ms),
            updated_at: timestamp_millis_from_sql(row_updated_ms),
        };
        let uid = entity_uid_from_sql(&entity_uid)?;
        let body = TimelineItem {
            kind: kind
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid timeline item kind: {kind}"))?,
            start_secs,
            duration_secs,
            offset_secs,
            audio_url: audio_url.parse()?,
            created_by: entity_uid_from_sql(&created_by)?,
            added_at: timestamp_millis_from_sql(added_at_ms),
            generation: try_decode_generation_metadata(
                gen_chords,
                gen_instrument,
                gen_style,
                gen_tempo_bpm,
                gen_key,
                gen_provider,
            )?,
        };
        Ok((header, track_id.into(), Entity::new(uid, body)))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = timeline_item)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: &'a [u8],
    pub(crate) track_id: RowId,
    pub(crate) kind: &'a str,
    pub(crate) start_secs: f64,
    pub(crate) duration_secs: f64,
    pub(crate) offset_secs: f64,
    pub(crate) audio_url: String,
    pub(crate) created_by: &'a [u8],
    pub(crate) added_at_ms: TimestampMillis,
    pub(crate) gen_chords: Option<String>,
    pub(crate) gen_instrument: Option<&'a str>,
    pub(crate) gen_style: Option<&'a str>,
    pub(crate) gen_tempo_bpm: Option<f64>,
    pub(crate) gen_key: Option<&'a str>,
    pub(crate) gen_provider: Option<&'a str>,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn try_bind(
        track_id: TrackId,
        created_at: DateTime,
        entity: &'a TimelineItemEntity,
    ) -> anyhow::Result<Self> {
        let row_created_updated_ms = created_at.timestamp_millis();
        let Entity { uid, body } = entity;
        let TimelineItem {
            kind,
            start_secs,
            duration_secs,
            offset_secs,
            audio_url,
            created_by,
            added_at,
            generation,
        } = body;
        let gen_chords = generation
            .as_ref()
            .map(|generation| chords_to_sql(&generation.chords))
            .transpose()?;
        Ok(Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            entity_uid: uid.as_bytes(),
            track_id: track_id.into(),
            kind: kind.as_str(),
            start_secs: *start_secs,
            duration_secs: *duration_secs,
            offset_secs: *offset_secs,
            audio_url: audio_url.to_string(),
            created_by: created_by.as_bytes(),
            added_at_ms: added_at.timestamp_millis(),
            gen_chords,
            gen_instrument: generation
                .as_ref()
                .map(|generation| generation.instrument.as_str()),
            gen_style: generation.as_ref().map(|generation| generation.style.as_str()),
            gen_tempo_bpm: generation.as_ref().map(|generation| generation.tempo.value()),
            gen_key: generation.as_ref().map(|generation| generation.key.as_str()),
            gen_provider: generation
                .as_ref()
                .map(|generation| generation.provider.as_str()),
        })
    }
}
