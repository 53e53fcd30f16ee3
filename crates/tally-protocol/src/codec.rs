//! Binary encoding/decoding for side-channel messages.
//!
//! This module converts between:
//! - raw frames (`&[u8]`) as carried on the messaging channel
//! - high-level [`Request`] / [`Response`] values
//!
//! Frame layout (single message per frame; the host transport provides
//! the outer framing):
//!
//! ```text
//! Request (tracker → proxy)
//! -------------------------
//! [tag: utf]                sub-channel tag string
//!
//! GetServers:
//!   (no body)
//!
//! PlayerCount:
//!   [server: utf]           target server name
//!
//! Response (proxy → tracker)
//! --------------------------
//! [tag: utf]
//!
//! PlayerCount:
//!   [server: utf]
//!   [count: i32 BE]
//!
//! GetServers:
//!   [servers: utf]          comma-separated roster
//!
//! utf = u16 BE byte length, then that many UTF-8 bytes
//! ```
//!
//! The `utf` field matches what the proxy's Java peer writes with
//! `DataOutput::writeUTF` for the names that occur in practice.
//!
//! Fields are consumed from the front of the buffer exactly as a stream
//! reader would; bytes trailing a complete frame are ignored.

use thiserror::Error;

use crate::messages::{Request, Response};
use crate::wire_types::SubChannel;

/// Errors that can arise when encoding/decoding a frame.
///
/// Decoding failures are *expected* on a best-effort side-channel: the
/// tracker maps every one of them to a silent discard. They are still
/// distinguished here so tests and tooling can assert on the exact
/// failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer too short for the expected fields.
    #[error("frame truncated")]
    Truncated,

    /// A string field did not hold valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    /// The frame's tag names a sub-channel we do not consume.
    #[error("unknown sub-channel tag: {0:?}")]
    UnknownSubChannel(String),

    /// A string exceeds the u16 byte-length prefix (encode only).
    #[error("string of {0} bytes does not fit the wire format")]
    StringTooLong(usize),
}

// ============================================================================
// Requests: tracker → proxy
// ============================================================================

/// Encode a single request into a frame.
///
/// The encoded bytes are appended to `out`. Inputs are validated before
/// anything is written, so a failed encode leaves `out` untouched.
pub fn encode_request(request: &Request, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    match request {
        Request::ServerList => {
            write_utf(SubChannel::Servers.tag(), out)?;
        }
        Request::PlayerCount { server } => {
            check_utf_len(server)?;
            write_utf(SubChannel::PlayerCount.tag(), out)?;
            write_utf(server, out)?;
        }
    }
    Ok(())
}

/// Decode a single request from a frame.
///
/// This is the **proxy-side** direction, used by the simulator and by
/// tests asserting on what the tracker put on the wire.
pub fn decode_request(buf: &[u8]) -> Result<Request, ProtocolError> {
    let (tag, rest) = read_utf(buf)?;

    match SubChannel::from_tag(&tag) {
        Some(SubChannel::Servers) => Ok(Request::ServerList),
        Some(SubChannel::PlayerCount) => {
            let (server, _rest) = read_utf(rest)?;
            Ok(Request::PlayerCount { server })
        }
        None => Err(ProtocolError::UnknownSubChannel(tag)),
    }
}

// ============================================================================
// Responses: proxy → tracker
// ============================================================================

/// Encode a single response into a frame (proxy-side direction).
///
/// The encoded bytes are appended to `out`; a failed encode leaves
/// `out` untouched.
pub fn encode_response(response: &Response, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    match response {
        Response::PlayerCount { server, count } => {
            check_utf_len(server)?;
            write_utf(SubChannel::PlayerCount.tag(), out)?;
            write_utf(server, out)?;
            out.extend_from_slice(&count.to_be_bytes());
        }
        Response::ServerList { servers } => {
            let joined = servers.join(",");
            check_utf_len(&joined)?;
            write_utf(SubChannel::Servers.tag(), out)?;
            write_utf(&joined, out)?;
        }
    }
    Ok(())
}

/// Decode a single response from a frame.
///
/// Roster responses are split on `,` with surrounding whitespace
/// trimmed from each name; no further filtering is applied.
pub fn decode_response(buf: &[u8]) -> Result<Response, ProtocolError> {
    let (tag, rest) = read_utf(buf)?;

    match SubChannel::from_tag(&tag) {
        Some(SubChannel::PlayerCount) => {
            let (server, rest) = read_utf(rest)?;
            let (count, _rest) = read_i32(rest)?;
            Ok(Response::PlayerCount { server, count })
        }
        Some(SubChannel::Servers) => {
            let (list, _rest) = read_utf(rest)?;
            let servers = list.split(',').map(|name| name.trim().to_string()).collect();
            Ok(Response::ServerList { servers })
        }
        None => Err(ProtocolError::UnknownSubChannel(tag)),
    }
}

// -----------------------------------------------------------------------------
// Field helpers
// -----------------------------------------------------------------------------

fn check_utf_len(s: &str) -> Result<(), ProtocolError> {
    if s.len() > usize::from(u16::MAX) {
        return Err(ProtocolError::StringTooLong(s.len()));
    }
    Ok(())
}

fn write_utf(s: &str, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    let bytes = s.as_bytes();
    let len = u16::try_from(bytes.len()).map_err(|_| ProtocolError::StringTooLong(bytes.len()))?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

fn read_utf(buf: &[u8]) -> Result<(String, &[u8]), ProtocolError> {
    if buf.len() < 2 {
        return Err(ProtocolError::Truncated);
    }
    let len = usize::from(u16::from_be_bytes([buf[0], buf[1]]));
    let rest = &buf[2..];
    if rest.len() < len {
        return Err(ProtocolError::Truncated);
    }
    let s = std::str::from_utf8(&rest[..len]).map_err(|_| ProtocolError::InvalidUtf8)?;
    Ok((s.to_string(), &rest[len..]))
}

fn read_i32(buf: &[u8]) -> Result<(i32, &[u8]), ProtocolError> {
    if buf.len() < 4 {
        return Err(ProtocolError::Truncated);
    }
    let value = i32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
    Ok((value, &buf[4..]))
}
