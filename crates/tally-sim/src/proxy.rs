//! Simulated proxy peer.
//!
//! Owns a scripted roster with per-server player counts and answers
//! request frames the way the real proxy does on the side-channel:
//! roster requests get the comma-joined server list, count requests
//! get a per-server report. Requests for servers the proxy does not
//! know simply go unanswered, which is a normal outcome on this
//! channel.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use tally_core::CountTracker;
use tally_protocol::{codec, Request, Response};

use crate::host::SimHost;
use crate::types::WireRx;

/// In-process stand-in for the routing proxy.
pub struct SimProxy {
    counts: HashMap<String, u32>,
}

impl SimProxy {
    /// Create a proxy fronting the given servers.
    ///
    /// Server names are held lower-cased; lookups are
    /// case-insensitive like the proxy's own routing.
    pub fn new(counts: impl IntoIterator<Item = (String, u32)>) -> Self {
        SimProxy {
            counts: counts
                .into_iter()
                .map(|(name, count)| (name.to_lowercase(), count))
                .collect(),
        }
    }

    /// Adjust one server's player count mid-scenario.
    pub fn set_count(&mut self, server: &str, count: u32) {
        self.counts.insert(server.to_lowercase(), count);
    }

    /// Answer one request frame with zero or more response frames.
    pub fn handle_frame(&self, payload: &[u8]) -> Vec<Vec<u8>> {
        let request = match codec::decode_request(payload) {
            Ok(request) => request,
            Err(err) => {
                debug!("proxy ignoring frame: {}", err);
                return Vec::new();
            }
        };

        let response = match request {
            Request::ServerList => {
                let roster: Vec<&str> = self.counts.keys().map(String::as_str).collect();
                Some(Response::server_list(roster))
            }
            Request::PlayerCount { server } => self
                .counts
                .get(&server.to_lowercase())
                .map(|count| Response::player_count(server, *count as i32)),
        };

        let Some(response) = response else {
            return Vec::new();
        };

        let mut frame = Vec::new();
        match codec::encode_response(&response, &mut frame) {
            Ok(()) => vec![frame],
            Err(err) => {
                debug!("proxy failed to encode {:?}: {}", response, err);
                Vec::new()
            }
        }
    }
}

/// Drain the simulated wire, answering each request and delivering the
/// replies back through the host's inbound dispatch.
pub async fn run_proxy_loop(
    proxy: SimProxy,
    mut wire_rx: WireRx,
    host: Arc<SimHost>,
    tracker: Arc<CountTracker>,
) {
    while let Some(frame) = wire_rx.recv().await {
        for reply in proxy.handle_frame(&frame.payload) {
            host.deliver_inbound(&tracker, &frame.channel, &reply);
        }
    }
    debug!("proxy loop shutting down (wire_rx closed)");
}
