// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters for external I/O: the vendor hook socket and the modem bus.

pub mod bus;
pub mod hook;
pub mod ofono;
pub mod socket;

pub use bus::{BusAdapter, BusError};
pub use hook::{HookAdapter, HookError};
pub use ofono::{watch_bus, OfonoBus, OFONO_SERVICE, SIM_MANAGER_IFACE};
pub use socket::{spawn_appearance_watcher, SocketHookAdapter};

// Test support
#[cfg(test)]
mod fake;
#[cfg(test)]
pub use fake::{FakeBusAdapter, FakeHookAdapter};
