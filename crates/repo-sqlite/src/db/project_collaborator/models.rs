// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::project::Collaborator;
use melodyhub_repo::project::RecordId as ProjectId;

use crate::prelude::*;

use super::schema::*;

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = project_collaborator, primary_key(row_id))]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) project_id: RowId,
    pub(crate) user_uid: Vec<u8>,
    pub(crate) active: bool,
}

impl TryFrom<QueryableRecord> for Collaborator {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            user_uid, active, ..
        } = from;
        Ok(Self {
            uid: entity_uid_from_sql(&user_uid)?,
            active,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = project_collaborator)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) project_id: RowId,
    pub(crate) user_uid: &'a [u8],
    pub(crate) active: bool,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(project_id: ProjectId, collaborator: &'a Collaborator) -> Self {
        let Collaborator { uid, active } = collaborator;
        Self {
            project_id: project_id.into(),
            user_uid: uid.as_bytes(),
            active: *active,
        }
    }
}
