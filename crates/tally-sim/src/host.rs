//! Simulated hosting game server.
//!
//! Implements the [`Transport`] interface the tracker core consumes:
//! a registry of connected carriers, listener registration flags, and
//! an outbound path that ships frames toward the proxy over the
//! simulated wire. Inbound delivery honors the registration state, so
//! an inactive tracker genuinely receives nothing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::{debug, trace, warn};

use tally_core::{CarrierId, CountTracker, Transport};

use crate::types::{Frame, WireTx};

/// In-process stand-in for the hosting game server.
pub struct SimHost {
    carriers: DashMap<CarrierId, ()>,
    next_carrier_id: AtomicU64,
    channels: DashMap<String, ()>,
    connectivity_registered: AtomicBool,
    wire_tx: WireTx,
}

impl SimHost {
    /// Create a host shipping outbound frames into `wire_tx`.
    pub fn new(wire_tx: WireTx) -> Self {
        SimHost {
            carriers: DashMap::new(),
            next_carrier_id: AtomicU64::new(1),
            channels: DashMap::new(),
            connectivity_registered: AtomicBool::new(false),
            wire_tx,
        }
    }

    /// Connect a new client to the host and return its carrier handle.
    ///
    /// The caller is responsible for dispatching the matching
    /// connectivity event to the tracker, as the host's event bus
    /// would.
    pub fn connect_carrier(&self) -> CarrierId {
        let id = CarrierId(self.next_carrier_id.fetch_add(1, Ordering::Relaxed));
        self.carriers.insert(id, ());
        debug!("carrier {:?} connected ({} online)", id, self.carriers.len());
        id
    }

    /// Disconnect a client.
    pub fn disconnect_carrier(&self, id: CarrierId) {
        self.carriers.remove(&id);
        debug!("carrier {:?} disconnected ({} online)", id, self.carriers.len());
    }

    /// Number of currently connected carriers.
    pub fn connected_carriers(&self) -> usize {
        self.carriers.len()
    }

    /// Whether connectivity events are currently subscribed.
    pub fn connectivity_registered(&self) -> bool {
        self.connectivity_registered.load(Ordering::SeqCst)
    }

    /// Deliver an inbound frame to the tracker, the way the host's
    /// message dispatch would: only if a listener is registered for
    /// the frame's channel.
    pub fn deliver_inbound(&self, tracker: &CountTracker, channel: &str, payload: &[u8]) {
        if !self.channels.contains_key(channel) {
            trace!("dropping inbound frame on {}: no listener", channel);
            return;
        }
        tracker.on_plugin_message(channel, payload);
    }
}

impl Transport for SimHost {
    fn register_connectivity_listener(&self) {
        self.connectivity_registered.store(true, Ordering::SeqCst);
    }

    fn unregister_connectivity_listener(&self) {
        self.connectivity_registered.store(false, Ordering::SeqCst);
    }

    fn register_message_listener(&self, channel: &str) {
        self.channels.insert(channel.to_string(), ());
    }

    fn unregister_message_listener(&self, channel: &str) {
        self.channels.remove(channel);
    }

    fn pick_carrier(&self) -> Option<CarrierId> {
        self.carriers.iter().next().map(|entry| *entry.key())
    }

    fn send(&self, channel: &str, carrier: CarrierId, payload: &[u8]) {
        if !self.carriers.contains_key(&carrier) {
            warn!("dropping send via unknown carrier {:?}", carrier);
            return;
        }
        let _ = self.wire_tx.send(Frame {
            channel: channel.to_string(),
            payload: payload.to_vec(),
        });
    }
}
