// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hook frame codec: decode inbound vendor frames, encode the readiness record.
//!
//! All integers are little-endian (vendor native order). Decoding is a total
//! function over arbitrary byte slices and never reads past the input.

use thiserror::Error;

/// Magic tag opening every raw hook frame, no trailing NUL.
pub const OEM_TAG: &[u8; 8] = b"QOEMHOOK";

/// Transaction registering the two callback endpoints (client -> service).
pub const TRANSACTION_SET_CALLBACK: u32 = 1;
/// Transaction carrying a raw hook request (client -> service).
pub const TRANSACTION_OEM_HOOK_RAW_REQUEST: u32 = 2;

/// Raw hook response code on the response endpoint.
pub const HOOK_RESPONSE_RAW: u32 = 1;
/// Raw hook indication code on the indication endpoint.
pub const HOOK_INDICATION_RAW: u32 = 1;

/// Request id announcing "telephony UI ready" to the radio stack.
pub const EVT_HOOK_SET_ATEL_UI_STATUS: i32 = 524_314;
/// Hook id of unsolicited raw indications.
pub const RIL_UNSOL_OEM_HOOK_RAW: i32 = 1028;

/// Encoded readiness record length: tag + request id + payload length + flag.
pub const READY_FRAME_LEN: usize = 17;

const HEADER_LEN: usize = 4;
const MIN_FRAME_LEN: usize = HEADER_LEN + OEM_TAG.len() + 8;

/// Errors from [`decode_indication`] and [`decode_response`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame too short: {len} bytes, need at least {need}")]
    TooShort { len: usize, need: usize },

    #[error("bad OEM tag")]
    BadTag,

    #[error("payload size {payload_size} exceeds {remaining} remaining bytes")]
    PayloadTruncated { payload_size: i32, remaining: usize },
}

/// A decoded vendor hook frame. The payload borrows from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFrame<'a> {
    pub hook_id: i32,
    pub response_id: i32,
    pub payload_size: i32,
    pub payload: &'a [u8],
}

/// A decoded raw hook response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse<'a> {
    pub serial: i32,
    pub error: i32,
    pub data: &'a [u8],
}

fn read_i32(buf: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

/// Decode a raw hook indication frame.
///
/// Layout: `hook_id:i32`, tag `[8]`, `response_id:i32`, `payload_size:i32`,
/// `payload[payload_size]`.
///
/// A `payload_size <= 0` skips the trailing length check and yields an empty
/// payload view. Zero-payload indications exist in the wild; negative sizes
/// get the same treatment deliberately.
pub fn decode_indication(buf: &[u8]) -> Result<HookFrame<'_>, FrameError> {
    if buf.len() < HEADER_LEN {
        return Err(FrameError::TooShort { len: buf.len(), need: HEADER_LEN });
    }
    let hook_id = read_i32(buf, 0);

    if buf.len() < MIN_FRAME_LEN {
        return Err(FrameError::TooShort { len: buf.len(), need: MIN_FRAME_LEN });
    }
    if &buf[HEADER_LEN..HEADER_LEN + OEM_TAG.len()] != OEM_TAG {
        return Err(FrameError::BadTag);
    }

    let response_id = read_i32(buf, HEADER_LEN + OEM_TAG.len());
    let payload_size = read_i32(buf, HEADER_LEN + OEM_TAG.len() + 4);

    let payload = if payload_size > 0 {
        let remaining = buf.len() - MIN_FRAME_LEN;
        if payload_size as usize > remaining {
            return Err(FrameError::PayloadTruncated { payload_size, remaining });
        }
        &buf[MIN_FRAME_LEN..MIN_FRAME_LEN + payload_size as usize]
    } else {
        &[]
    };

    Ok(HookFrame { hook_id, response_id, payload_size, payload })
}

/// Decode a raw hook response body: `serial:i32`, `error:i32`, trailing data.
pub fn decode_response(buf: &[u8]) -> Result<RawResponse<'_>, FrameError> {
    if buf.len() < 8 {
        return Err(FrameError::TooShort { len: buf.len(), need: 8 });
    }
    Ok(RawResponse { serial: read_i32(buf, 0), error: read_i32(buf, 4), data: &buf[8..] })
}

/// Encode the fixed readiness record, byte-exact and independent of host
/// alignment. The transacted message prepends the 4-byte serial.
pub fn encode_ready_frame(tag: &[u8; 8], request_id: i32, is_ready: bool) -> [u8; READY_FRAME_LEN] {
    let mut frame = [0u8; READY_FRAME_LEN];
    frame[..8].copy_from_slice(tag);
    frame[8..12].copy_from_slice(&request_id.to_le_bytes());
    frame[12..16].copy_from_slice(&1i32.to_le_bytes());
    frame[16] = u8::from(is_ready);
    frame
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
