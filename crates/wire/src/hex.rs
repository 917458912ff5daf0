// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hex dump helper for payload logging.

use std::fmt::Write;

/// Render up to `max` bytes as space-separated hex, noting any elision.
pub fn hex_dump(data: &[u8], max: usize) -> String {
    let shown = data.len().min(max);
    let mut out = String::with_capacity(shown * 3 + 16);
    for (i, byte) in data[..shown].iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // write! to a String cannot fail
        let _ = write!(out, "{byte:02x}");
    }
    if data.len() > shown {
        let _ = write!(out, " .. ({} bytes total)", data.len());
    }
    out
}
