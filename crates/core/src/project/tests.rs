// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn new_project(created_by: UserUid) -> Project {
    Project {
        title: "Untitled Project".into(),
        created_by,
        collaborators: vec![],
        tempo: TempoBpm::new(120.0),
        key: KeySignature::from("C Major"),
    }
}

#[test]
fn creator_has_access() {
    let creator = UserUid::random();
    let project = new_project(creator);
    assert!(project.is_accessible_by(&creator));
}

#[test]
fn active_collaborator_has_access() {
    let collaborator = UserUid::random();
    let mut project = new_project(UserUid::random());
    project.collaborators.push(Collaborator {
        uid: collaborator,
        active: true,
    });
    assert!(project.is_accessible_by(&collaborator));
}

#[test]
fn inactive_collaborator_has_no_access() {
    let collaborator = UserUid::random();
    let mut project = new_project(UserUid::random());
    project.collaborators.push(Collaborator {
        uid: collaborator,
        active: false,
    });
    assert!(!project.is_accessible_by(&collaborator));
}

#[test]
fn stranger_has_no_access() {
    let project = new_project(UserUid::random());
    assert!(!project.is_accessible_by(&UserUid::random()));
}

#[test]
fn validate_project() {
    let project = new_project(UserUid::random());
    assert!(project.validate().is_ok());
}

#[test]
fn invalidate_project_with_blank_title() {
    let mut project = new_project(UserUid::random());
    project.title = " ".into();
    assert!(project.validate().is_err());
}

#[test]
fn invalidate_project_with_invalid_tempo() {
    let mut project = new_project(UserUid::random());
    project.tempo = TempoBpm::new(-1.0);
    assert!(project.validate().is_err());
}
