// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::PromptParams;

/// Assemble the natural-language prompt for an instrumental-only,
/// vocal-free, melody-free backing track.
///
/// Chords are embedded comma-joined in their original order. No side
/// effects.
#[must_use]
pub fn build_backing_prompt(params: &PromptParams) -> String {
    let PromptParams {
        chords,
        instrument,
        style,
        tempo,
        key,
    } = params;
    let mut progression = String::new();
    for (index, chord) in chords.iter().enumerate() {
        if index > 0 {
            progression.push_str(", ");
        }
        progression.push_str(chord.as_str());
    }
    format!(
        "Backing track: {instrument} playing chord progression {progression} in {key} \
         at {tempo}BPM. {style} style. Clean chords only, no melody, no vocals. \
         Professional studio quality. Instrumental only.",
        tempo = tempo.value(),
    )
}

#[cfg(test)]
mod tests {
    use melodyhub_core::music::{key::KeySignature, tempo::TempoBpm};

    use super::*;

    fn jazz_params() -> PromptParams {
        PromptParams {
            chords: vec!["Cmaj7".into(), "Am7".into(), "Dm7".into(), "G7".into()],
            instrument: "Piano".into(),
            style: "Jazz".into(),
            tempo: TempoBpm::new(120.0),
            key: KeySignature::from("C Major"),
        }
    }

    #[test]
    fn jazz_piano_prompt() {
        let expected = "Backing track: Piano playing chord progression Cmaj7, Am7, Dm7, G7 \
                        in C Major at 120BPM. Jazz style. Clean chords only, no melody, \
                        no vocals. Professional studio quality. Instrumental only.";
        assert_eq!(expected, build_backing_prompt(&jazz_params()));
    }

    #[test]
    fn prompt_contains_every_chord_exactly_once() {
        let params = jazz_params();
        let prompt = build_backing_prompt(&params);
        assert!(prompt.contains("Cmaj7, Am7, Dm7, G7"));
        for chord in &params.chords {
            assert_eq!(1, prompt.matches(chord.as_str()).count());
        }
    }

    #[test]
    fn prompt_contains_instrument_key_and_tempo_verbatim() {
        let params = PromptParams {
            chords: vec!["Em".into(), "C".into()],
            instrument: "Acoustic Guitar".into(),
            style: "Folk".into(),
            tempo: TempoBpm::new(96.0),
            key: KeySignature::from("E Minor"),
        };
        let prompt = build_backing_prompt(&params);
        assert!(prompt.contains("Acoustic Guitar"));
        assert!(prompt.contains("E Minor"));
        assert!(prompt.contains("96BPM"));
        assert!(prompt.contains("Folk style"));
    }

    #[test]
    fn single_chord_progression_has_no_separator() {
        let mut params = jazz_params();
        params.chords = vec!["Cmaj7".into()];
        let prompt = build_backing_prompt(&params);
        assert!(prompt.contains("chord progression Cmaj7 in"));
    }
}
