//! Transport interface the host environment provides.
//!
//! The side-channel rides on ordinary client connections: an outbound
//! frame is handed to any one currently connected client (the
//! "carrier"), and the proxy's replies come back through the host's
//! inbound message dispatch. The tracker only needs the narrow surface
//! below; everything else about the host stays opaque.

/// Identifier for a connected client usable as a message carrier.
///
/// This is intentionally opaque; the host just guarantees uniqueness
/// over the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarrierId(pub u64);

/// Host-side collaborator the tracker sends through and registers with.
///
/// Implementations must be callable from any thread; none of these
/// methods may block on network round-trips. `send` is fire-and-forget:
/// the tracker never waits for, times out on, or correlates a reply.
pub trait Transport: Send + Sync {
    /// Start delivering connectivity (join/leave) events.
    fn register_connectivity_listener(&self);

    /// Stop delivering connectivity events.
    fn unregister_connectivity_listener(&self);

    /// Start delivering inbound frames for `channel`.
    fn register_message_listener(&self, channel: &str);

    /// Stop delivering inbound frames for `channel`.
    fn unregister_message_listener(&self, channel: &str);

    /// Any one currently connected carrier, or `None` when no client
    /// is connected. Which one is unspecified.
    fn pick_carrier(&self) -> Option<CarrierId>;

    /// Ship `payload` on `channel` via `carrier`, fire-and-forget.
    fn send(&self, channel: &str, carrier: CarrierId, payload: &[u8]);
}
