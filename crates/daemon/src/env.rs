// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access and built-in defaults.

use std::time::Duration;

/// Default vendor hook service socket.
pub const DEFAULT_DEVICE: &str = "/dev/socket/oemhook0";

/// Default hook interface name; the callback endpoint names derive from it.
pub const DEFAULT_INTERFACE: &str = "vendor.qti.hardware.radio.qcrilhook@1.0::IQtiOemHook";

/// Per-call bus reply budget (default 5s, configurable via
/// `OEMTUNNEL_BUS_TIMEOUT_MS`).
pub fn bus_timeout() -> Duration {
    std::env::var("OEMTUNNEL_BUS_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}
