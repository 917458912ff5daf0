// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events that drive the orchestrator.
//!
//! Every external callback source (service discovery, death notification,
//! bus name ownership, SIM property signals, inbound hook frames) is mapped
//! to one variant and delivered through a single channel, so the gate
//! recomputation happens in exactly one dispatch function.

/// An event dispatched serially by the daemon loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The vendor hook service appeared (or an initial connect attempt is due).
    ServiceAppeared,
    /// The vendor hook service connection dropped.
    ServiceDied,
    /// The modem-management bus service gained an owner.
    BusAppeared,
    /// The modem-management bus service lost its owner.
    BusVanished,
    /// A SIM property-change signal for some modem object path.
    SimPropertyChanged { modem_path: String, property: String },
    /// A frame arrived on the response endpoint.
    HookResponse { code: u32, payload: Vec<u8> },
    /// A frame arrived on the indication endpoint.
    HookIndication { code: u32, payload: Vec<u8> },
}
