// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection, registration and SIM state, plus the readiness gate.

/// Link state of the vendor hook service connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}

/// Whether the two callback endpoints are registered with the remote service.
///
/// Scoped to one connection epoch: a death event always resets this to
/// `Unregistered`, even if the same service name reappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationState {
    #[default]
    Unregistered,
    Registered,
}

impl RegistrationState {
    pub fn is_registered(self) -> bool {
        self == RegistrationState::Registered
    }
}

/// Derived SIM lock state for the monitored slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimUnlockState {
    #[default]
    Unknown,
    Locked,
    Unlocked,
}

/// Availability of the modem-management bus service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusAvailability {
    #[default]
    Unavailable,
    Available,
}

impl BusAvailability {
    pub fn is_available(self) -> bool {
        self == BusAvailability::Available
    }
}

/// The three-way readiness gate.
///
/// Pure so the orchestrator can recompute it at every trigger point instead
/// of caching a possibly stale combination.
pub fn ready_to_signal(
    conn: ConnectionState,
    reg: RegistrationState,
    unlock: SimUnlockState,
) -> bool {
    conn.is_connected() && reg.is_registered() && unlock == SimUnlockState::Unlocked
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
