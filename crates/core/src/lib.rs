// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! oemtunnel-core: state machine types for the vendor radio readiness bridge

pub mod event;
pub mod serial;
pub mod sim;
pub mod state;

pub use event::Event;
pub use serial::TxSerial;
pub use sim::{SimProperties, PIN_REQUIRED_NONE, PROP_CARD_IDENTIFIER, PROP_PIN_REQUIRED};
pub use state::{
    ready_to_signal, BusAvailability, ConnectionState, RegistrationState, SimUnlockState,
};
