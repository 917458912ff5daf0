// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! The daemon body returns `ExitError` instead of calling
//! `std::process::exit()` directly, allowing `main()` to handle process
//! termination.

use std::fmt;

/// Clean shutdown.
pub const EXIT_OK: u8 = 0;
/// A configured resource (SIM slot) does not exist.
pub const EXIT_NOT_FOUND: u8 = 1;
/// Invalid command line. Matches the argument parser's own exit code.
pub const EXIT_INVALID_ARG: u8 = 2;
/// Any other fatal error.
pub const EXIT_ERROR: u8 = 3;

#[derive(Debug)]
pub struct ExitError {
    pub code: u8,
    pub message: String,
}

impl ExitError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
