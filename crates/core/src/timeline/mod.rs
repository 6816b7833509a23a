// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{
    entity::{Entity, EntityUid, UserUid},
    music::{
        chord::{ChordName, ChordNameInvalidity},
        key::{KeySignature, KeySignatureInvalidity},
        tempo::{TempoBpm, TempoBpmInvalidity},
    },
    prelude::*,
    util::{self, clock::DateTime},
};

pub type TimelineItemUid = EntityUid;

pub type TimelineItemEntity = Entity<TimelineItem>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Audio,
    Chords,
}

impl ItemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Chords => "chords",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("invalid timeline item kind")]
pub struct ParseItemKindError;

impl FromStr for ItemKind {
    type Err = ParseItemKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(Self::Audio),
            "chords" => Ok(Self::Chords),
            _ => Err(ParseItemKindError),
        }
    }
}

/// Parameters a generated item was rendered from.
///
/// Kept alongside the item so a rendition can be reproduced or
/// regenerated with tweaked parameters later.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationMetadata {
    pub chords: Vec<ChordName>,
    pub instrument: String,
    pub style: String,
    pub tempo: TempoBpm,
    pub key: KeySignature,
    pub provider: String,
}

#[derive(Copy, Clone, Debug)]
pub enum GenerationMetadataInvalidity {
    ChordsEmpty,
    Chord(ChordNameInvalidity),
    InstrumentEmpty,
    StyleEmpty,
    Tempo(TempoBpmInvalidity),
    Key(KeySignatureInvalidity),
    ProviderEmpty,
}

impl Validate for GenerationMetadata {
    type Invalidity = GenerationMetadataInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            chords,
            instrument,
            style,
            tempo,
            key,
            provider,
        } = self;
        let context = ValidationContext::new()
            .invalidate_if(chords.is_empty(), Self::Invalidity::ChordsEmpty)
            .invalidate_if(util::is_blank(instrument), Self::Invalidity::InstrumentEmpty)
            .invalidate_if(util::is_blank(style), Self::Invalidity::StyleEmpty)
            .validate_with(tempo, Self::Invalidity::Tempo)
            .validate_with(key, Self::Invalidity::Key)
            .invalidate_if(util::is_blank(provider), Self::Invalidity::ProviderEmpty);
        chords
            .iter()
            .fold(context, |context, chord| {
                context.validate_with(chord, Self::Invalidity::Chord)
            })
            .into()
    }
}

/// A discrete audio event placed on a track's timeline.
///
/// Items are append-only. Editing operations replace items instead of
/// mutating them in place.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineItem {
    pub kind: ItemKind,

    /// Position on the timeline in seconds.
    pub start_secs: f64,

    pub duration_secs: f64,

    /// Playback offset into the source audio in seconds.
    pub offset_secs: f64,

    pub audio_url: Url,

    pub created_by: UserUid,

    pub added_at: DateTime,

    /// Present iff the item was produced by the generation workflow.
    pub generation: Option<GenerationMetadata>,
}

#[derive(Copy, Clone, Debug)]
pub enum TimelineItemInvalidity {
    StartOutOfRange,
    DurationOutOfRange,
    OffsetOutOfRange,
    Generation(GenerationMetadataInvalidity),
}

impl Validate for TimelineItem {
    type Invalidity = TimelineItemInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            start_secs,
            duration_secs,
            offset_secs,
            generation,
            ..
        } = self;
        let context = ValidationContext::new()
            .invalidate_if(
                !start_secs.is_finite() || *start_secs < 0.0,
                Self::Invalidity::StartOutOfRange,
            )
            .invalidate_if(
                !duration_secs.is_finite() || *duration_secs <= 0.0,
                Self::Invalidity::DurationOutOfRange,
            )
            .invalidate_if(
                !offset_secs.is_finite() || *offset_secs < 0.0,
                Self::Invalidity::OffsetOutOfRange,
            );
        if let Some(generation) = generation {
            context.validate_with(generation, Self::Invalidity::Generation)
        } else {
            context
        }
        .into()
    }
}

#[cfg(test)]
mod tests;
