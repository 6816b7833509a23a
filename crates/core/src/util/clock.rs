// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub type TimestampMillis = i64;

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Point in time with millisecond precision.
///
/// Values are truncated to milliseconds on construction so that
/// round-trips through storage preserve equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateTime(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl DateTime {
    #[must_use]
    pub fn now_utc() -> Self {
        Self::from_timestamp_millis(unix_timestamp_millis(OffsetDateTime::now_utc()))
    }

    #[must_use]
    pub fn from_timestamp_millis(timestamp_millis: TimestampMillis) -> Self {
        let timestamp_nanos = i128::from(timestamp_millis) * NANOS_PER_MILLI;
        let inner = OffsetDateTime::from_unix_timestamp_nanos(timestamp_nanos)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);
        Self(inner)
    }

    #[must_use]
    pub fn timestamp_millis(self) -> TimestampMillis {
        let Self(inner) = self;
        unix_timestamp_millis(inner)
    }

    #[must_use]
    pub const fn to_inner(self) -> OffsetDateTime {
        let Self(inner) = self;
        inner
    }
}

#[allow(clippy::cast_possible_truncation)]
fn unix_timestamp_millis(date_time: OffsetDateTime) -> TimestampMillis {
    (date_time.unix_timestamp_nanos() / NANOS_PER_MILLI) as TimestampMillis
}

impl From<OffsetDateTime> for DateTime {
    fn from(inner: OffsetDateTime) -> Self {
        Self::from_timestamp_millis(unix_timestamp_millis(inner))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(inner) = self;
        let formatted = inner.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

#[derive(Debug)]
pub struct ParseDateTimeError;

impl FromStr for DateTime {
    type Err = ParseDateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s, &Rfc3339)
            .map(Into::into)
            .map_err(|_| ParseDateTimeError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_millis_roundtrip() {
        let now = DateTime::now_utc();
        assert_eq!(now, DateTime::from_timestamp_millis(now.timestamp_millis()));
    }

    #[test]
    fn display_parse_roundtrip() {
        let now = DateTime::now_utc();
        assert_eq!(now, now.to_string().parse::<DateTime>().unwrap());
    }

    #[test]
    fn truncates_to_millisecond_precision() {
        let inner = OffsetDateTime::from_unix_timestamp_nanos(1_234_567_890_123_456).unwrap();
        let truncated = DateTime::from(inner);
        assert_eq!(1_234_567_890, truncated.timestamp_millis());
    }
}
