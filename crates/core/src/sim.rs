// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SIM property set and the unlock derivation rule.

use std::collections::HashMap;

use crate::state::SimUnlockState;

/// Property key identifying the card (ICCID).
pub const PROP_CARD_IDENTIFIER: &str = "CardIdentifier";
/// Property key for the pending PIN requirement.
pub const PROP_PIN_REQUIRED: &str = "PinRequired";
/// `PinRequired` value meaning no PIN is pending.
pub const PIN_REQUIRED_NONE: &str = "none";

/// A snapshot of the SIM-manager property set, stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimProperties(HashMap<String, String>);

impl SimProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Both properties have to be present with the right values to report
    /// unlocked. Otherwise a false positive could happen while the card is
    /// still being loaded by the modem manager.
    pub fn is_unlocked(&self) -> bool {
        let has_card = self.get(PROP_CARD_IDENTIFIER).is_some_and(|id| !id.is_empty());
        has_card && self.get(PROP_PIN_REQUIRED) == Some(PIN_REQUIRED_NONE)
    }

    pub fn unlock_state(&self) -> SimUnlockState {
        if self.is_unlocked() {
            SimUnlockState::Unlocked
        } else {
            SimUnlockState::Locked
        }
    }
}

impl FromIterator<(String, String)> for SimProperties {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "sim_tests.rs"]
mod tests;
