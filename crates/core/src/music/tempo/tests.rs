// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn validate_tempo() {
    assert!(TempoBpm::new(120.0).validate().is_ok());
    assert!(TempoBpm::MIN.validate().is_ok());
    assert!(TempoBpm::MAX.validate().is_ok());
}

#[test]
fn invalidate_tempo_out_of_range() {
    assert!(TempoBpm::new(0.0).validate().is_err());
    assert!(TempoBpm::new(-120.0).validate().is_err());
    assert!(TempoBpm::new(TempoBpmValue::NAN).validate().is_err());
    assert!(TempoBpm::new(TempoBpmValue::INFINITY).validate().is_err());
}
