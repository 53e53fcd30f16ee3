//! tally-protocol
//!
//! Wire-level encoding/decoding for the proxy side-channel.
//!
//! This crate is responsible for turning logical tracker messages
//! ([`Request`] / [`Response`]) into bytes and back again.
//!
//! - [`wire_types`] : channel name, sub-channel tags
//! - [`messages`]   : logical request/response types
//! - [`codec`]      : binary frame codec

pub mod codec;
pub mod messages;
pub mod wire_types;

pub use codec::{
    ProtocolError,
    decode_request,
    decode_response,
    encode_request,
    encode_response,
};

pub use messages::{Request, Response};
pub use wire_types::{SubChannel, MESSAGE_CHANNEL};
