// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hook service adapter contract.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from hook service operations.
#[derive(Debug, Error)]
pub enum HookError {
    /// The service socket does not exist or refuses connections.
    #[error("hook service not found")]
    NotFound,

    #[error("not connected to hook service")]
    NotConnected,

    #[error("transport error: {0}")]
    Transport(#[from] oemtunnel_wire::ProtocolError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client side of the vendor hook IPC service.
///
/// Implementations deliver inbound frames and death notifications as events
/// on the daemon channel; these methods cover the client-initiated half.
#[async_trait]
pub trait HookAdapter: Send + Sync {
    /// Attempt to reach the service. `NotFound` is the non-fatal "wait for
    /// appearance" case.
    async fn connect(&self) -> Result<(), HookError>;

    /// Release the connection handle. Idempotent.
    async fn disconnect(&self);

    /// Issue one transaction towards the service.
    async fn transact(&self, code: u32, payload: &[u8]) -> Result<(), HookError>;
}
