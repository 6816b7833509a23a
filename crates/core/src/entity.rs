// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Globally unique, immutable identifier of a domain entity.
///
/// Random (UUID v4), addressable as the hyphenated string form
/// in URLs and JSON.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct EntityUid(Uuid);

/// Identity of an authenticated user.
///
/// Users are managed by an upstream identity provider and only
/// referenced here.
pub type UserUid = EntityUid;

#[derive(Error, Debug)]
#[error("invalid entity uid")]
pub struct DecodeError;

impl EntityUid {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        let Self(uuid) = self;
        uuid
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.as_uuid().as_bytes()
    }

    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        Uuid::from_slice(bytes).map(Self).map_err(|_| DecodeError)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.as_uuid().is_nil()
    }
}

impl fmt::Display for EntityUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_uuid().as_hyphenated().fmt(f)
    }
}

impl FromStr for EntityUid {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Uuid>().map(Self).map_err(|_| DecodeError)
    }
}

/// A domain body paired with its unique identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity<B> {
    pub uid: EntityUid,
    pub body: B,
}

impl<B> Entity<B> {
    #[must_use]
    pub const fn new(uid: EntityUid, body: B) -> Self {
        Self { uid, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_string_roundtrip() {
        let uid = EntityUid::random();
        let parsed = uid.to_string().parse::<EntityUid>().unwrap();
        assert_eq!(uid, parsed);
    }

    #[test]
    fn uid_slice_roundtrip() {
        let uid = EntityUid::random();
        let decoded = EntityUid::try_from_slice(uid.as_bytes()).unwrap();
        assert_eq!(uid, decoded);
    }

    #[test]
    fn decode_rejects_truncated_slice() {
        let uid = EntityUid::random();
        assert!(EntityUid::try_from_slice(&uid.as_bytes()[..15]).is_err());
    }

    #[test]
    fn random_uids_are_distinct() {
        assert_ne!(EntityUid::random(), EntityUid::random());
    }
}
