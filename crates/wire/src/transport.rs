// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport framing for the hook service socket.
//!
//! Each transaction travels as: 4-byte big-endian length prefix, endpoint
//! byte, 4-byte big-endian transaction code, payload. The length covers
//! everything after the prefix.

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single frame; anything larger is a protocol violation.
pub const MAX_FRAME_SIZE: u32 = 1024 * 1024;

const FRAME_HEADER_LEN: u32 = 5;

/// Which logical endpoint a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Endpoint {
    /// Client -> service transaction.
    Request = 0,
    /// Service -> client, response endpoint.
    Response = 1,
    /// Service -> client, indication endpoint.
    Indication = 2,
}

impl Endpoint {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Endpoint::Request),
            1 => Some(Endpoint::Response),
            2 => Some(Endpoint::Indication),
            _ => None,
        }
    }
}

/// One framed transaction on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFrame {
    pub endpoint: Endpoint,
    pub code: u32,
    pub payload: Vec<u8>,
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame of {0} bytes exceeds maximum {MAX_FRAME_SIZE}")]
    FrameTooLarge(u32),

    #[error("frame of {0} bytes is below the header size")]
    FrameTooSmall(u32),

    #[error("unknown endpoint byte {0:#04x}")]
    BadEndpoint(u8),
}

/// Read one frame. An EOF before a complete frame surfaces as an io error,
/// which the connector treats as a death notification.
pub async fn read_frame<R>(reader: &mut R) -> Result<TransportFrame, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf);

    if len > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge(len));
    }
    if len < FRAME_HEADER_LEN {
        return Err(ProtocolError::FrameTooSmall(len));
    }

    let mut endpoint_buf = [0u8; 1];
    reader.read_exact(&mut endpoint_buf).await?;
    let endpoint =
        Endpoint::from_byte(endpoint_buf[0]).ok_or(ProtocolError::BadEndpoint(endpoint_buf[0]))?;

    let mut code_buf = [0u8; 4];
    reader.read_exact(&mut code_buf).await?;
    let code = u32::from_be_bytes(code_buf);

    let mut payload = vec![0u8; (len - FRAME_HEADER_LEN) as usize];
    reader.read_exact(&mut payload).await?;

    Ok(TransportFrame { endpoint, code, payload })
}

/// Write and flush one frame.
pub async fn write_frame<W>(
    writer: &mut W,
    endpoint: Endpoint,
    code: u32,
    payload: &[u8],
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let len = FRAME_HEADER_LEN + payload.len() as u32;
    if len > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge(len));
    }

    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&[endpoint as u8]).await?;
    writer.write_all(&code.to_be_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Payload for the set-callback transaction: the two endpoint interface
/// names, each prefixed with a 4-byte big-endian length.
pub fn encode_set_callback(resp_iface: &str, ind_iface: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(8 + resp_iface.len() + ind_iface.len());
    for iface in [resp_iface, ind_iface] {
        payload.extend_from_slice(&(iface.len() as u32).to_be_bytes());
        payload.extend_from_slice(iface.as_bytes());
    }
    payload
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
