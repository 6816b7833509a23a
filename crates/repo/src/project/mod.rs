// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use melodyhub_core::{
    project::{ProjectEntity, ProjectUid},
    util::clock::DateTime,
};

use crate::prelude::*;

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

pub trait EntityRepo {
    fn insert_project_entity(
        &mut self,
        created_at: DateTime,
        created_entity: &ProjectEntity,
    ) -> RepoResult<RecordId>;

    fn resolve_project_id(&mut self, uid: &ProjectUid) -> RepoResult<RecordId>;

    fn load_project_entity(&mut self, id: RecordId) -> RepoResult<(RecordHeader, ProjectEntity)>;
}
