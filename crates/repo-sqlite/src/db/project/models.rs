// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    entity::Entity,
    music::{key::KeySignature, tempo::TempoBpm},
    project::{Collaborator, Project, ProjectEntity},
    util::clock::{DateTime, TimestampMillis},
};
use melodyhub_repo::project::RecordHeader;

use crate::prelude::*;

use super::schema::*;

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = project, primary_key(row_id))]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: Vec<u8>,
    pub(crate) title: String,
    pub(crate) created_by: Vec<u8>,
    pub(crate) tempo_bpm: f64,
    pub(crate) key_signature: String,
}

impl QueryableRecord {
    pub(crate) fn try_decode(
        self,
        collaborators: Vec<Collaborator>,
    ) -> anyhow::Result<(RecordHeader, ProjectEntity)> {
        let Self {
            row_id,
            row_created_ms,
            row_updated_ms,
            entity_uid,
            title,
            created_by,
            tempo_bpm,
            key_signature,
        } = self;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: timestamp_millis_from_sql(row_created_ms),
            updated_at: timestamp_millis_from_sql(row_updated_ms),
        };
        let uid = entity_uid_from_sql(&entity_uid)?;
        let body = Project {
            title,
            created_by: entity_uid_from_sql(&created_by)?,
            collaborators,
            tempo: TempoBpm::new(tempo_bpm),
            key: KeySignature::from(key_signature),
        };
        Ok((header, Entity::new(uid, body)))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = project)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: &'a [u8],
    pub(crate) title: &'a str,
    pub(crate) created_by: &'a [u8],
    pub(crate) tempo_bpm: f64,
    pub(crate) key_signature: &'a str,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: DateTime, entity: &'a ProjectEntity) -> Self {
        let row_created_updated_ms = created_at.timestamp_millis();
        let Entity { uid, body } = entity;
        let Project {
            title,
            created_by,
            collaborators: _,
            tempo,
            key,
        } = body;
        Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            entity_uid: uid.as_bytes(),
            title,
            created_by: created_by.as_bytes(),
            tempo_bpm: tempo.value(),
            key_signature: key.as_str(),
        }
    }
}
