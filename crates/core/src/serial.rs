// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction serial counter.

/// Monotonically increasing transaction tag for outbound hook requests.
///
/// Owned by the readiness sender rather than living in process-global state.
/// Wraps on overflow; the value is an opaque tag, not a correctness input.
#[derive(Debug, Clone)]
pub struct TxSerial {
    next: i32,
}

impl TxSerial {
    pub fn new() -> Self {
        // first serial value
        Self { next: 1 }
    }

    /// Return the current serial and advance.
    pub fn next(&mut self) -> i32 {
        let serial = self.next;
        self.next = self.next.wrapping_add(1);
        serial
    }
}

impl Default for TxSerial {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "serial_tests.rs"]
mod tests;
