// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection lifecycle for the vendor hook service.

use oemtunnel_core::ConnectionState;
use tracing::{info, warn};

use crate::adapters::{HookAdapter, HookError};

/// Tracks the hook service link and owns the adapter handle.
pub struct Connector<H> {
    hook: H,
    state: ConnectionState,
}

impl<H: HookAdapter> Connector<H> {
    pub fn new(hook: H) -> Self {
        Self { hook, state: ConnectionState::default() }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Try to reach the service. `NotFound` leaves us waiting for the next
    /// appearance event; other errors are reported the same way.
    pub async fn connect(&mut self) -> Result<(), HookError> {
        match self.hook.connect().await {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                info!("connected to hook service");
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e)
            }
        }
    }

    /// Handle a death notification: drop the link and forget the connection.
    pub async fn mark_dead(&mut self) {
        if self.is_connected() {
            warn!("hook service died");
        }
        self.disconnect().await;
    }

    pub async fn disconnect(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.hook.disconnect().await;
    }
}
