// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{prelude::*, util};

/// Musical key of a project or rendition, e.g. "C Major" or "A Minor".
///
/// Stored as the display form the user picked. Generation prompts embed
/// the value verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySignature(String);

impl KeySignature {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        let Self(key) = self;
        key
    }
}

impl From<String> for KeySignature {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for KeySignature {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl AsRef<str> for KeySignature {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug)]
pub enum KeySignatureInvalidity {
    Empty,
    Padded,
}

impl Validate for KeySignature {
    type Invalidity = KeySignatureInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(util::is_blank(self.as_str()), Self::Invalidity::Empty)
            .invalidate_if(util::is_padded(self.as_str()), Self::Invalidity::Padded)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_key_signatures() {
        assert!(KeySignature::from("C Major").validate().is_ok());
        assert!(KeySignature::from("F# Minor").validate().is_ok());
    }

    #[test]
    fn invalidate_blank_key_signatures() {
        assert!(KeySignature::from("").validate().is_err());
        assert!(KeySignature::from(" ").validate().is_err());
    }
}
