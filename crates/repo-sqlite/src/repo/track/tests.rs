// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use melodyhub_core::{
    entity::{Entity, EntityUid},
    track::{Track, TrackKind},
    util::clock::DateTime,
};
use melodyhub_repo::track::ProjectRepo as _;

use crate::{
    prelude::tests::{establish_connection, TestResult},
    repo::tests::{create_project, sample_backing_track_entity},
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

fn new_audio_track_entity(title: &str) -> Entity<Track> {
    Entity::new(
        EntityUid::random(),
        Track {
            title: title.into(),
            kind: TrackKind::Audio,
            mixer: Default::default(),
        },
    )
}

#[test]
fn insert_backing_track_if_absent() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);
    let (project_id, _) = create_project(&mut db)?;

    let entity = sample_backing_track_entity();
    let id = db
        .insert_project_track_if_absent(project_id, DateTime::now_utc(), &entity)?
        .expect("inserted");

    let (header, found) = db
        .find_project_track_by_kind(project_id, TrackKind::Backing)?
        .expect("found");
    assert_eq!(id, header.id);
    assert_eq!(entity, found);
    Ok(())
}

#[test]
fn insert_backing_track_if_absent_is_idempotent() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);
    let (project_id, _) = create_project(&mut db)?;

    let first = sample_backing_track_entity();
    let second = sample_backing_track_entity();
    assert!(db
        .insert_project_track_if_absent(project_id, DateTime::now_utc(), &first)?
        .is_some());
    // A concurrent loser of the race observes a suppressed insert.
    assert!(db
        .insert_project_track_if_absent(project_id, DateTime::now_utc(), &second)?
        .is_none());

    let tracks = db.load_project_tracks(project_id)?;
    assert_eq!(1, tracks.len());
    assert_eq!(first, tracks[0].1);
    Ok(())
}

#[test]
fn backing_tracks_of_distinct_projects_do_not_conflict() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);
    let (first_project_id, _) = create_project(&mut db)?;
    let (second_project_id, _) = create_project(&mut db)?;

    assert!(db
        .insert_project_track_if_absent(
            first_project_id,
            DateTime::now_utc(),
            &sample_backing_track_entity(),
        )?
        .is_some());
    assert!(db
        .insert_project_track_if_absent(
            second_project_id,
            DateTime::now_utc(),
            &sample_backing_track_entity(),
        )?
        .is_some());
    Ok(())
}

#[test]
fn multiple_audio_tracks_per_project() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);
    let (project_id, _) = create_project(&mut db)?;

    db.insert_project_track(
        project_id,
        DateTime::now_utc(),
        &new_audio_track_entity("Guitar"),
    )?;
    db.insert_project_track(
        project_id,
        DateTime::now_utc(),
        &new_audio_track_entity("Vocals"),
    )?;

    assert_eq!(2, db.load_project_tracks(project_id)?.len());
    Ok(())
}

#[test]
fn find_missing_track_by_kind() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);
    let (project_id, _) = create_project(&mut db)?;

    assert!(db
        .find_project_track_by_kind(project_id, TrackKind::Backing)?
        .is_none());
    Ok(())
}
