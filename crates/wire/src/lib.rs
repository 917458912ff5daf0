// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vendor hook wire codec.
//!
//! Two layers: the vendor-specific hook frame (magic tag + ids + payload)
//! carried inside generic transactions, and the length-prefixed transport
//! framing used to move transactions over the socket.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod actions;
mod frame;
mod hex;
mod transport;

pub use actions::response_action;
pub use frame::{
    decode_indication, decode_response, encode_ready_frame, FrameError, HookFrame, RawResponse,
    EVT_HOOK_SET_ATEL_UI_STATUS, HOOK_INDICATION_RAW, HOOK_RESPONSE_RAW, OEM_TAG,
    READY_FRAME_LEN, RIL_UNSOL_OEM_HOOK_RAW, TRANSACTION_OEM_HOOK_RAW_REQUEST,
    TRANSACTION_SET_CALLBACK,
};
pub use hex::hex_dump;
pub use transport::{
    encode_set_callback, read_frame, write_frame, Endpoint, ProtocolError, TransportFrame,
    MAX_FRAME_SIZE,
};
