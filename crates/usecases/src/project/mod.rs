// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::Validate as _;

use melodyhub_core::{
    entity::{EntityUid, UserUid},
    music::tempo::TempoBpm,
    project::{Project, ProjectEntity, ProjectUid},
    util::clock::DateTime,
};
use melodyhub_repo::project::{EntityRepo, RecordHeader, RecordId};

use crate::{Error, InputResult, Result};

/// Defaults for projects created without explicit musical settings.
pub const DEFAULT_TEMPO: TempoBpm = TempoBpm::new(120.0);
pub const DEFAULT_KEY: &str = "C Major";

#[derive(Debug)]
pub struct ValidatedInput(Project);

pub fn validate_input(project: Project) -> InputResult<ValidatedInput> {
    if let Err(err) = project.validate() {
        return Err(anyhow::anyhow!("invalid project input: {err:?}").into());
    }
    Ok(ValidatedInput(project))
}

pub fn create_entity(project: Project) -> Result<ProjectEntity> {
    let ValidatedInput(project) = validate_input(project)?;
    Ok(ProjectEntity::new(EntityUid::random(), project))
}

pub fn store_created_entity<Repo>(repo: &mut Repo, entity: &ProjectEntity) -> Result<RecordId>
where
    Repo: EntityRepo,
{
    let created_at = DateTime::now_utc();
    let id = repo.insert_project_entity(created_at, entity)?;
    log::debug!("Created project {uid}", uid = entity.uid);
    Ok(id)
}

pub fn load_entity<Repo>(
    repo: &mut Repo,
    uid: &ProjectUid,
) -> Result<(RecordHeader, ProjectEntity)>
where
    Repo: EntityRepo,
{
    let id = repo.resolve_project_id(uid)?;
    repo.load_project_entity(id).map_err(Into::into)
}

/// Creator or active collaborator, checked before anything else
/// happens on behalf of the request.
pub fn authorize_access(project: &Project, user: &UserUid) -> Result<()> {
    if project.is_accessible_by(user) {
        return Ok(());
    }
    Err(Error::Forbidden)
}

#[cfg(test)]
mod tests {
    use melodyhub_core::music::key::KeySignature;

    use super::*;

    fn new_project() -> Project {
        Project {
            title: "Demo Project".into(),
            created_by: UserUid::random(),
            collaborators: vec![],
            tempo: DEFAULT_TEMPO,
            key: KeySignature::from(DEFAULT_KEY),
        }
    }

    #[test]
    fn create_entity_with_random_uid() {
        let first = create_entity(new_project()).unwrap();
        let second = create_entity(new_project()).unwrap();
        assert_ne!(first.uid, second.uid);
    }

    #[test]
    fn create_entity_rejects_blank_title() {
        let mut project = new_project();
        project.title = "  ".into();
        assert!(matches!(create_entity(project), Err(Error::Input(_))));
    }

    #[test]
    fn authorize_creator() {
        let project = new_project();
        let creator = project.created_by;
        assert!(authorize_access(&project, &creator).is_ok());
    }

    #[test]
    fn reject_stranger() {
        let project = new_project();
        assert!(matches!(
            authorize_access(&project, &UserUid::random()),
            Err(Error::Forbidden),
        ));
    }
}
