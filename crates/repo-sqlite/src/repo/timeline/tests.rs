// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use melodyhub_core::{
    entity::{Entity, EntityUid},
    music::{key::KeySignature, tempo::TempoBpm},
    timeline::{GenerationMetadata, ItemKind, TimelineItem, TimelineItemEntity},
    util::clock::DateTime,
};
use melodyhub_repo::{timeline::TrackRepo as _, track::ProjectRepo as _, track::RecordId as TrackId};

use crate::{
    prelude::tests::{establish_connection, TestResult},
    repo::tests::{create_project, sample_backing_track_entity},
    Connection, DbConnection,
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

fn create_backing_track(db: &mut Connection<'_>) -> TestResult<TrackId> {
    let (project_id, _) = create_project(db)?;
    let track_id =
        db.insert_project_track(project_id, DateTime::now_utc(), &sample_backing_track_entity())?;
    Ok(track_id)
}

fn new_generated_item_entity(audio_url: &str) -> TimelineItemEntity {
    Entity::new(
        EntityUid::random(),
        TimelineItem {
            kind: ItemKind::Audio,
            start_secs: 0.0,
            duration_secs: 30.0,
            offset_secs: 0.0,
            audio_url: audio_url.parse().unwrap(),
            created_by: EntityUid::random(),
            added_at: DateTime::now_utc(),
            generation: Some(GenerationMetadata {
                chords: vec!["Cmaj7".into(), "Am7".into(), "Dm7".into(), "G7".into()],
                instrument: "Piano".into(),
                style: "Jazz".into(),
                tempo: TempoBpm::new(120.0),
                key: KeySignature::from("C Major"),
                provider: "suno".into(),
            }),
        },
    )
}

#[test]
fn append_and_load_generated_item() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);
    let track_id = create_backing_track(&mut db)?;

    let entity = new_generated_item_entity("https://cdn.melodyhub.app/renders/take-1.mp3");
    let id = db.append_timeline_item(track_id, DateTime::now_utc(), &entity)?;

    let items = db.load_timeline_items(track_id)?;
    assert_eq!(1, items.len());
    let (header, loaded) = &items[0];
    assert_eq!(id, header.id);
    assert_eq!(&entity, loaded);
    Ok(())
}

#[test]
fn append_preserves_prior_items() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);
    let track_id = create_backing_track(&mut db)?;

    let first = new_generated_item_entity("https://cdn.melodyhub.app/renders/take-1.mp3");
    let second = new_generated_item_entity("https://cdn.melodyhub.app/renders/take-2.mp3");
    db.append_timeline_item(track_id, DateTime::now_utc(), &first)?;
    db.append_timeline_item(track_id, DateTime::now_utc(), &second)?;

    let items = db.load_timeline_items(track_id)?;
    assert_eq!(2, items.len());
    assert_eq!(first, items[0].1);
    assert_eq!(second, items[1].1);
    assert_eq!(2, db.count_timeline_items(track_id)?);
    Ok(())
}

#[test]
fn item_without_generation_metadata_roundtrip() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);
    let track_id = create_backing_track(&mut db)?;

    let mut entity = new_generated_item_entity("https://cdn.melodyhub.app/uploads/riff.mp3");
    entity.body.generation = None;
    db.append_timeline_item(track_id, DateTime::now_utc(), &entity)?;

    let items = db.load_timeline_items(track_id)?;
    assert_eq!(1, items.len());
    assert_eq!(entity, items[0].1);
    Ok(())
}
