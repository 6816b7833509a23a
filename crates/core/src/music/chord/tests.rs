// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn validate_chord_names() {
    assert!(ChordName::from("Cmaj7").validate().is_ok());
    assert!(ChordName::from("F#m7b5").validate().is_ok());
    assert!(ChordName::from("C/E").validate().is_ok());
}

#[test]
fn invalidate_blank_chord_names() {
    assert!(ChordName::from("").validate().is_err());
    assert!(ChordName::from("  ").validate().is_err());
}

#[test]
fn invalidate_padded_chord_names() {
    assert!(ChordName::from(" Cmaj7").validate().is_err());
    assert!(ChordName::from("Cmaj7 ").validate().is_err());
}
