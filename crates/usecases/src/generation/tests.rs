// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn new_params() -> Params {
    Params {
        chords: vec!["Cmaj7".into(), "Am7".into(), "Dm7".into(), "G7".into()],
        instrument: Some("Piano".into()),
        style: Some("Jazz".into()),
        tempo: Some(TempoBpm::new(120.0)),
        key: Some(KeySignature::from("C Major")),
        duration_secs: Some(16.0),
    }
}

fn new_project() -> Project {
    Project {
        title: "Demo Project".into(),
        created_by: UserUid::random(),
        collaborators: vec![],
        tempo: TempoBpm::new(90.0),
        key: KeySignature::from("G Major"),
    }
}

#[test]
fn validate_params_accepts_complete_request() {
    assert!(validate_params(new_params()).is_ok());
}

#[test]
fn validate_params_rejects_empty_chords() {
    let mut params = new_params();
    params.chords.clear();
    assert!(validate_params(params).is_err());
}

#[test]
fn validate_params_rejects_blank_chord() {
    let mut params = new_params();
    params.chords.push("  ".into());
    assert!(validate_params(params).is_err());
}

#[test]
fn validate_params_rejects_non_positive_duration() {
    let mut params = new_params();
    params.duration_secs = Some(0.0);
    assert!(validate_params(params).is_err());

    let mut params = new_params();
    params.duration_secs = Some(f64::NAN);
    assert!(validate_params(params).is_err());
}

#[test]
fn resolve_request_keeps_explicit_parameters() {
    let validated = validate_params(new_params()).unwrap();
    let resolved = resolve_request(validated, &new_project());
    assert_eq!("Piano", resolved.prompt_params.instrument);
    assert_eq!("Jazz", resolved.prompt_params.style);
    assert_eq!(TempoBpm::new(120.0), resolved.prompt_params.tempo);
    assert_eq!(KeySignature::from("C Major"), resolved.prompt_params.key);
    assert_eq!(16.0, resolved.duration_secs);
}

#[test]
fn resolve_request_falls_back_to_project_defaults() {
    let mut params = new_params();
    params.instrument = None;
    params.style = None;
    params.tempo = None;
    params.key = None;
    params.duration_secs = None;

    let validated = validate_params(params).unwrap();
    let resolved = resolve_request(validated, &new_project());
    assert_eq!(DEFAULT_INSTRUMENT, resolved.prompt_params.instrument);
    assert_eq!(DEFAULT_STYLE, resolved.prompt_params.style);
    assert_eq!(TempoBpm::new(90.0), resolved.prompt_params.tempo);
    assert_eq!(KeySignature::from("G Major"), resolved.prompt_params.key);
    assert_eq!(DEFAULT_DURATION_SECS, resolved.duration_secs);
}

#[test]
fn metadata_carries_provider_tag() {
    let validated = validate_params(new_params()).unwrap();
    let resolved = resolve_request(validated, &new_project());
    let metadata = generation_metadata(resolved.prompt_params);
    assert_eq!(PROVIDER, metadata.provider);
    assert_eq!(4, metadata.chords.len());
}
