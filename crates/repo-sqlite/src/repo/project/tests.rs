// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use melodyhub_core::{entity::EntityUid, project::Collaborator, util::clock::DateTime};
use melodyhub_repo::{
    prelude::RepoError,
    project::{EntityRepo as _, RecordId},
};

use crate::{
    prelude::tests::{establish_connection, TestResult},
    repo::tests::sample_project_entity,
    DbConnection,
};

struct Fixture {
    db: DbConnection,
}

impl Fixture {
    fn new() -> TestResult<Self> {
        let db = establish_connection()?;
        Ok(Self { db })
    }
}

#[test]
fn insert_and_load_project() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let mut entity = sample_project_entity();
    entity.body.collaborators.push(Collaborator {
        uid: EntityUid::random(),
        active: true,
    });
    entity.body.collaborators.push(Collaborator {
        uid: EntityUid::random(),
        active: false,
    });

    let id = db.insert_project_entity(DateTime::now_utc(), &entity)?;
    let (_header, loaded) = db.load_project_entity(id)?;
    assert_eq!(entity, loaded);
    Ok(())
}

#[test]
fn resolve_project_id_by_uid() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let entity = sample_project_entity();
    let id = db.insert_project_entity(DateTime::now_utc(), &entity)?;
    assert_eq!(id, db.resolve_project_id(&entity.uid)?);
    Ok(())
}

#[test]
fn resolve_unknown_project_fails() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    assert!(matches!(
        db.resolve_project_id(&EntityUid::random()),
        Err(RepoError::NotFound),
    ));
    Ok(())
}

#[test]
fn load_unknown_project_fails() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    assert!(matches!(
        db.load_project_entity(RecordId::new(4711)),
        Err(RepoError::NotFound),
    ));
    Ok(())
}
