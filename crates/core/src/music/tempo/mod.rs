// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub type TempoBpmValue = f64;

/// Musical tempo in beats per minute.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempoBpm(TempoBpmValue);

impl TempoBpm {
    pub const UNIT_OF_MEASURE: &'static str = "bpm";

    pub const MIN: Self = Self(TempoBpmValue::MIN_POSITIVE);
    pub const MAX: Self = Self(1000.0);

    #[must_use]
    pub const fn new(value: TempoBpmValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> TempoBpmValue {
        let Self(value) = self;
        value
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        <Self as IsValid>::is_valid(self)
    }
}

#[derive(Copy, Clone, Debug)]
pub enum TempoBpmInvalidity {
    OutOfRange,
}

impl Validate for TempoBpm {
    type Invalidity = TempoBpmInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !(*self >= Self::MIN && *self <= Self::MAX),
                Self::Invalidity::OutOfRange,
            )
            .into()
    }
}

impl fmt::Display for TempoBpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{value} {unit}",
            value = self.value(),
            unit = Self::UNIT_OF_MEASURE
        )
    }
}

#[cfg(test)]
mod tests;
