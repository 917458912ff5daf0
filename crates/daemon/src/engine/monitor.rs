// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SIM slot monitor.
//!
//! Resolves the configured slot to a modem object path, keeps a derived
//! unlock state, and reacts to `PinRequired` changes. Monitoring is deferred
//! while the bus service is absent and restarted when it reappears.

use oemtunnel_core::{BusAvailability, SimUnlockState, PROP_PIN_REQUIRED};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::adapters::{BusAdapter, BusError};

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("slot {slot} not available, {count} modem(s) present")]
    SlotNotFound { slot: u32, count: usize },

    #[error(transparent)]
    Bus(#[from] BusError),
}

pub struct SimMonitor<B> {
    bus: B,
    availability: BusAvailability,
    target_slot: Option<u32>,
    modem_path: Option<String>,
    state: SimUnlockState,
    monitoring: bool,
}

impl<B: BusAdapter> SimMonitor<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            availability: BusAvailability::default(),
            target_slot: None,
            modem_path: None,
            state: SimUnlockState::default(),
            monitoring: false,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.monitoring && self.state == SimUnlockState::Unlocked
    }

    /// Unlock state as seen by the readiness gate. Anything short of an
    /// actively monitored, unlocked SIM reads as not unlocked.
    pub fn unlock_state(&self) -> SimUnlockState {
        if self.monitoring {
            self.state
        } else {
            SimUnlockState::Unknown
        }
    }

    /// Begin monitoring the given slot. If the bus service is not there yet
    /// the slot is remembered and monitoring starts on the appearance event.
    pub async fn start(&mut self, slot: u32) -> Result<(), MonitorError> {
        self.stop();
        self.target_slot = Some(slot);

        if !self.availability.is_available() {
            debug!(slot, "bus service absent, monitoring deferred");
            return Ok(());
        }

        let paths = self.bus.modem_paths().await?;
        let path = paths
            .get(slot as usize)
            .cloned()
            .ok_or(MonitorError::SlotNotFound { slot, count: paths.len() })?;

        self.modem_path = Some(path.clone());
        self.monitoring = true;
        // An initial fetch failure is not fatal; the property-change signal
        // path will correct the state.
        if let Err(e) = self.refresh_properties().await {
            warn!(modem = %path, error = %e, "initial SIM property fetch failed");
        }
        info!(slot, modem = %path, unlocked = self.is_unlocked(), "SIM monitoring started");
        Ok(())
    }

    async fn refresh_properties(&mut self) -> Result<(), BusError> {
        let Some(path) = self.modem_path.clone() else {
            return Ok(());
        };
        let props = self.bus.sim_properties(&path).await?;
        for (name, value) in props.iter() {
            debug!(modem = %path, name, value, "SIM property");
        }
        self.state = props.unlock_state();
        Ok(())
    }

    /// The bus service gained an owner: restart monitoring for the recorded
    /// slot, if any.
    pub async fn handle_bus_appeared(&mut self) {
        self.availability = BusAvailability::Available;
        if let Some(slot) = self.target_slot {
            if let Err(e) = self.start(slot).await {
                error!(slot, error = %e, "failed to start SIM monitoring");
            }
        }
    }

    /// The bus service lost its owner: forget everything derived from it.
    pub fn handle_bus_vanished(&mut self) {
        self.availability = BusAvailability::Unavailable;
        let slot = self.target_slot;
        self.stop();
        self.target_slot = slot;
    }

    /// React to one SIM property-change signal. Returns `true` only on a
    /// rising edge of the unlock state.
    pub async fn handle_property_changed(&mut self, modem_path: &str, property: &str) -> bool {
        if !self.monitoring {
            return false;
        }
        if self.modem_path.as_deref() != Some(modem_path) {
            return false;
        }
        if property != PROP_PIN_REQUIRED {
            return false;
        }

        let was_unlocked = self.is_unlocked();
        if let Err(e) = self.refresh_properties().await {
            // Err on the locked side until a query succeeds again.
            warn!(modem = %modem_path, error = %e, "SIM property query failed");
            self.state = SimUnlockState::Locked;
        }
        !was_unlocked && self.is_unlocked()
    }

    /// Stop monitoring and reset derived state. Idempotent; keeps the bus
    /// availability, which tracks the service and not our interest in it.
    pub fn stop(&mut self) {
        self.target_slot = None;
        self.modem_path = None;
        self.state = SimUnlockState::Unknown;
        self.monitoring = false;
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
