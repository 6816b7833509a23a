// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    entity::Entity,
    track::{MixerSettings, Track, TrackEntity},
    util::clock::{DateTime, TimestampMillis},
};
use melodyhub_repo::{project::RecordId as ProjectId, track::RecordHeader};

use crate::prelude::*;

use super::schema::*;

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = track, primary_key(row_id))]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: Vec<u8>,
    pub(crate) project_id: RowId,
    pub(crate) title: String,
    pub(crate) kind: String,
    pub(crate) volume: f64,
    pub(crate) pan: f64,
    pub(crate) muted: bool,
    pub(crate) solo: bool,
}

impl TryFrom<QueryableRecord> for (RecordHeader, ProjectId, TrackEntity) {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            row_id,
            row_created_ms,
            row_updated_ms,
            entity_uid,
            project_id,
            title,
            kind,
            volume,
            pan,
            muted,
            solo,
        } = from;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: timestamp_millis_from_sql(row_created_ms),
            updated_at: timestamp_millis_from_sql(row_updated_ms),
        };
        let uid = entity_uid_from_sql(&entity_uid)?;
        let body = Track {
            title,
            kind: kind
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid track kind: {kind}"))?,
            mixer: MixerSettings {
                volume,
                pan,
                muted,
                solo,
            },
        };
        Ok((header, project_id.into(), Entity::new(uid, body)))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = track)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: &'a [u8],
    pub(crate) project_id: RowId,
    pub(crate) title: &'a str,
    pub(crate) kind: &'a str,
    pub(crate) volume: f64,
    pub(crate) pan: f64,
    pub(crate) muted: bool,
    pub(crate) solo: bool,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(
        project_id: ProjectId,
        created_at: DateTime,
        entity: &'a TrackEntity,
    ) -> Self {
        let row_created_updated_ms = created_at.timestamp_millis();
        let Entity { uid, body } = entity;
        let Track { title, kind, mixer } = body;
        let MixerSettings {
            volume,
            pan,
            muted,
            solo,
        } = *mixer;
        Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            entity_uid: uid.as_bytes(),
            project_id: project_id.into(),
            title,
            kind: kind.as_str(),
            volume,
            pan,
            muted,
            solo,
        }
    }
}
