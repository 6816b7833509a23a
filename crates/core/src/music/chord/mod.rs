// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{prelude::*, util};

/// Symbolic chord name as entered by the user, e.g. "Cmaj7" or "F#m".
///
/// Free-form on purpose. The name is passed through verbatim into
/// generation prompts and playback mappings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChordName(String);

impl ChordName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        let Self(name) = self;
        name
    }
}

impl From<String> for ChordName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for ChordName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for ChordName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ChordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug)]
pub enum ChordNameInvalidity {
    Empty,
    Padded,
}

impl Validate for ChordName {
    type Invalidity = ChordNameInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(util::is_blank(self.as_str()), Self::Invalidity::Empty)
            .invalidate_if(util::is_padded(self.as_str()), Self::Invalidity::Padded)
            .into()
    }
}

#[cfg(test)]
mod tests;
