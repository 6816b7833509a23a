// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{
    entity::{Entity, EntityUid, UserUid},
    music::{
        key::{KeySignature, KeySignatureInvalidity},
        tempo::{TempoBpm, TempoBpmInvalidity},
    },
    prelude::*,
    util,
};

pub type ProjectUid = EntityUid;

pub type ProjectEntity = Entity<Project>;

/// A user granted access to a project without being its creator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Collaborator {
    pub uid: UserUid,

    /// Revoked collaborators are kept for attribution but lose access.
    pub active: bool,
}

/// A collaborative music project.
///
/// Carries the default tempo and key that generation requests fall
/// back to when the request omits them.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub title: String,
    pub created_by: UserUid,
    pub collaborators: Vec<Collaborator>,
    pub tempo: TempoBpm,
    pub key: KeySignature,
}

impl Project {
    /// Creator or active collaborator.
    #[must_use]
    pub fn is_accessible_by(&self, user: &UserUid) -> bool {
        if self.created_by == *user {
            return true;
        }
        self.collaborators
            .iter()
            .any(|collaborator| collaborator.active && collaborator.uid == *user)
    }
}

#[derive(Copy, Clone, Debug)]
pub enum ProjectInvalidity {
    TitleEmpty,
    Tempo(TempoBpmInvalidity),
    Key(KeySignatureInvalidity),
}

impl Validate for Project {
    type Invalidity = ProjectInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            title, tempo, key, ..
        } = self;
        ValidationContext::new()
            .invalidate_if(util::is_blank(title), Self::Invalidity::TitleEmpty)
            .validate_with(tempo, Self::Invalidity::Tempo)
            .validate_with(key, Self::Invalidity::Key)
            .into()
    }
}

#[cfg(test)]
mod tests;
