// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn new_generated_item() -> TimelineItem {
    TimelineItem {
        kind: ItemKind::Audio,
        start_secs: 0.0,
        duration_secs: 30.0,
        offset_secs: 0.0,
        audio_url: "https://cdn.example.com/audio/take-1.mp3".parse().unwrap(),
        created_by: UserUid::random(),
        added_at: DateTime::now_utc(),
        generation: Some(GenerationMetadata {
            chords: vec!["Cmaj7".into(), "Am7".into()],
            instrument: "Piano".into(),
            style: "Jazz".into(),
            tempo: TempoBpm::new(120.0),
            key: KeySignature::from("C Major"),
            provider: "suno".into(),
        }),
    }
}

#[test]
fn validate_generated_item() {
    assert!(new_generated_item().validate().is_ok());
}

#[test]
fn validate_plain_audio_item_without_metadata() {
    let mut item = new_generated_item();
    item.generation = None;
    assert!(item.validate().is_ok());
}

#[test]
fn invalidate_non_positive_duration() {
    let mut item = new_generated_item();
    item.duration_secs = 0.0;
    assert!(item.validate().is_err());
    item.duration_secs = -1.0;
    assert!(item.validate().is_err());
}

#[test]
fn invalidate_negative_start_and_offset() {
    let mut item = new_generated_item();
    item.start_secs = -0.5;
    assert!(item.validate().is_err());

    let mut item = new_generated_item();
    item.offset_secs = -0.5;
    assert!(item.validate().is_err());
}

#[test]
fn invalidate_metadata_without_chords() {
    let mut item = new_generated_item();
    if let Some(generation) = &mut item.generation {
        generation.chords.clear();
    }
    assert!(item.validate().is_err());
}

#[test]
fn invalidate_metadata_with_invalid_chord() {
    let mut item = new_generated_item();
    if let Some(generation) = &mut item.generation {
        generation.chords.push("".into());
    }
    assert!(item.validate().is_err());
}
