// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Modem-management bus adapter contract.

use std::time::Duration;

use async_trait::async_trait;
use oemtunnel_core::SimProperties;
use thiserror::Error;

/// Errors from bus queries.
#[derive(Debug, Error)]
pub enum BusError {
    /// The remote service did not answer within the per-call budget.
    #[error("bus call timed out after {0:?}")]
    Timeout(Duration),

    #[error("bus error: {0}")]
    Bus(String),
}

/// Query side of the modem-management bus.
///
/// Property-change signals and name ownership changes arrive as events on the
/// daemon channel; these methods cover on-demand queries.
#[async_trait]
pub trait BusAdapter: Send + Sync {
    /// Enumerate available modem object paths, in slot order.
    async fn modem_paths(&self) -> Result<Vec<String>, BusError>;

    /// Fetch the SIM manager properties for one modem.
    async fn sim_properties(&self, modem_path: &str) -> Result<SimProperties, BusError>;
}
