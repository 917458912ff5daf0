// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback endpoint registration, scoped to one connection epoch.

use oemtunnel_core::RegistrationState;
use oemtunnel_wire::{encode_set_callback, TRANSACTION_SET_CALLBACK};
use tracing::info;

use crate::adapters::{HookAdapter, HookError};

pub struct Registrar {
    state: RegistrationState,
    resp_iface: String,
    ind_iface: String,
}

impl Registrar {
    pub fn new(resp_iface: String, ind_iface: String) -> Self {
        Self { state: RegistrationState::default(), resp_iface, ind_iface }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    pub fn is_registered(&self) -> bool {
        self.state.is_registered()
    }

    /// Register the response and indication endpoints once per connection.
    /// A repeat call while already registered is a no-op.
    pub async fn register<H: HookAdapter>(&mut self, hook: &H) -> Result<(), HookError> {
        if self.is_registered() {
            return Ok(());
        }
        let payload = encode_set_callback(&self.resp_iface, &self.ind_iface);
        hook.transact(TRANSACTION_SET_CALLBACK, &payload).await?;
        self.state = RegistrationState::Registered;
        info!(
            response = %self.resp_iface,
            indication = %self.ind_iface,
            "callback endpoints registered"
        );
        Ok(())
    }

    /// Forget the registration. Called on every death event; the next epoch
    /// has to register again.
    pub fn reset(&mut self) {
        self.state = RegistrationState::Unregistered;
    }
}

#[cfg(test)]
#[path = "registrar_tests.rs"]
mod tests;
