// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unlock derivation cases.

use super::*;

fn props(pairs: &[(&str, &str)]) -> SimProperties {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn card_present_and_no_pin_is_unlocked() {
    let p = props(&[("CardIdentifier", "89014103211118510720"), ("PinRequired", "none")]);
    assert!(p.is_unlocked());
    assert_eq!(p.unlock_state(), SimUnlockState::Unlocked);
}

#[test]
fn pin_required_without_card_identifier_is_locked() {
    let p = props(&[("PinRequired", "pin")]);
    assert!(!p.is_unlocked());
    assert_eq!(p.unlock_state(), SimUnlockState::Locked);
}

#[test]
fn empty_property_set_is_locked() {
    let p = SimProperties::new();
    assert!(!p.is_unlocked());
    assert_eq!(p.unlock_state(), SimUnlockState::Locked);
}

#[test]
fn card_identifier_alone_is_locked() {
    let p = props(&[("CardIdentifier", "89014103211118510720")]);
    assert!(!p.is_unlocked());
}

#[test]
fn empty_card_identifier_is_locked() {
    let p = props(&[("CardIdentifier", ""), ("PinRequired", "none")]);
    assert!(!p.is_unlocked());
}

#[test]
fn pending_pin_with_card_is_locked() {
    let p = props(&[("CardIdentifier", "89014103211118510720"), ("PinRequired", "pin")]);
    assert!(!p.is_unlocked());
}
