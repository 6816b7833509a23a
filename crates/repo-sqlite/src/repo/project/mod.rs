// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    project::{ProjectEntity, ProjectUid},
    util::clock::DateTime,
};
use melodyhub_repo::project::{EntityRepo, RecordHeader, RecordId};

use crate::{
    db::{
        project::{models::*, schema::*},
        project_collaborator::{models as collaborator_models, schema::*},
    },
    prelude::*,
};

impl EntityRepo for Connection<'_> {
    fn insert_project_entity(
        &mut self,
        created_at: DateTime,
        created_entity: &ProjectEntity,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, created_entity);
        let query = diesel::insert_into(project::table).values(&insertable);
        let rows_affected = query.execute(self.as_mut()).map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        let id = self.resolve_project_id(&created_entity.uid)?;
        let insertable_collaborators: Vec<_> = created_entity
            .body
            .collaborators
            .iter()
            .map(|collaborator| collaborator_models::InsertableRecord::bind(id, collaborator))
            .collect();
        if !insertable_collaborators.is_empty() {
            let query = diesel::insert_into(project_collaborator::table)
                .values(&insertable_collaborators);
            let rows_affected = query.execute(self.as_mut()).map_err(repo_error)?;
            debug_assert_eq!(insertable_collaborators.len(), rows_affected);
        }
        Ok(id)
    }

    fn resolve_project_id(&mut self, uid: &ProjectUid) -> RepoResult<RecordId> {
        project::table
            .select(project::row_id)
            .filter(project::entity_uid.eq(uid.as_bytes().as_slice()))
            .first::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_project_entity(&mut self, id: RecordId) -> RepoResult<(RecordHeader, ProjectEntity)> {
        let record = project::table
            .filter(project::row_id.eq(RowId::from(id)))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        let collaborators = project_collaborator::table
            .filter(project_collaborator::project_id.eq(RowId::from(id)))
            .order_by(project_collaborator::row_id)
            .load::<collaborator_models::QueryableRecord>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<anyhow::Result<Vec<_>>>()?;
        record.try_decode(collaborators).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests;
