// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    entity::{Entity, EntityUid},
    prelude::*,
    util,
};

pub type TrackUid = EntityUid;

pub type TrackEntity = Entity<Track>;

/// What a track holds on its timeline.
///
/// Stored and serialized as the lowercase canonical string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Auto-generated instrumental accompaniment. At most one per project.
    Backing,

    /// User-arranged chord progression.
    Chords,

    /// Recorded or imported audio clips.
    Audio,
}

impl TrackKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backing => "backing",
            Self::Chords => "chords",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("invalid track kind")]
pub struct ParseTrackKindError;

impl FromStr for TrackKind {
    type Err = ParseTrackKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backing" => Ok(Self::Backing),
            "chords" => Ok(Self::Chords),
            "audio" => Ok(Self::Audio),
            _ => Err(ParseTrackKindError),
        }
    }
}

/// Per-track playback settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MixerSettings {
    /// Linear gain in 0..=1.
    pub volume: f64,

    /// Stereo position in -1..=1, 0 = center.
    pub pan: f64,

    pub muted: bool,
    pub solo: bool,
}

impl MixerSettings {
    pub const DEFAULT_VOLUME: f64 = 0.8;
    pub const DEFAULT_PAN: f64 = 0.0;
}

impl Default for MixerSettings {
    fn default() -> Self {
        Self {
            volume: Self::DEFAULT_VOLUME,
            pan: Self::DEFAULT_PAN,
            muted: false,
            solo: false,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub enum MixerSettingsInvalidity {
    VolumeOutOfRange,
    PanOutOfRange,
}

impl Validate for MixerSettings {
    type Invalidity = MixerSettingsInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { volume, pan, .. } = self;
        ValidationContext::new()
            .invalidate_if(
                !(*volume >= 0.0 && *volume <= 1.0),
                Self::Invalidity::VolumeOutOfRange,
            )
            .invalidate_if(
                !(*pan >= -1.0 && *pan <= 1.0),
                Self::Invalidity::PanOutOfRange,
            )
            .into()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub title: String,
    pub kind: TrackKind,
    pub mixer: MixerSettings,
}

impl Track {
    /// Template for the lazily created backing track of a project.
    #[must_use]
    pub fn new_backing() -> Self {
        Self {
            title: "Backing Track".into(),
            kind: TrackKind::Backing,
            mixer: Default::default(),
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub enum TrackInvalidity {
    TitleEmpty,
    Mixer(MixerSettingsInvalidity),
}

impl Validate for Track {
    type Invalidity = TrackInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { title, mixer, .. } = self;
        ValidationContext::new()
            .invalidate_if(util::is_blank(title), Self::Invalidity::TitleEmpty)
            .validate_with(mixer, Self::Invalidity::Mixer)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_kind_string_roundtrip() {
        for kind in [TrackKind::Backing, TrackKind::Chords, TrackKind::Audio] {
            assert_eq!(kind, kind.as_str().parse().unwrap());
        }
    }

    #[test]
    fn validate_default_backing_track() {
        assert!(Track::new_backing().validate().is_ok());
    }

    #[test]
    fn invalidate_mixer_out_of_range() {
        let mut track = Track::new_backing();
        track.mixer.volume = 1.5;
        assert!(track.validate().is_err());
        track.mixer.volume = MixerSettings::DEFAULT_VOLUME;
        track.mixer.pan = -2.0;
        assert!(track.validate().is_err());
    }
}
