//! Shared types for the simulation wiring.
//!
//! This module defines:
//! - `Frame`: one side-channel payload in flight toward the proxy
//! - channel aliases between the simulated host and the proxy task

use tokio::sync::mpsc;

/// One outbound payload captured from [`Transport::send`].
///
/// [`Transport::send`]: tally_core::Transport::send
#[derive(Debug)]
pub struct Frame {
    /// Channel the frame was sent on.
    pub channel: String,

    /// Raw frame bytes.
    pub payload: Vec<u8>,
}

/// Host → proxy direction of the simulated wire.
pub type WireTx = mpsc::UnboundedSender<Frame>;
pub type WireRx = mpsc::UnboundedReceiver<Frame>;
