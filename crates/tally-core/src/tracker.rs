//! Count cache + refresh controller.
//!
//! The tracker owns the count tables and decides, in response to
//! connectivity events and inbound frames, what to request next:
//! - A carrier joining while the roster is unknown triggers a roster
//!   request; once servers are known, joins and leaves both trigger a
//!   count-request sweep over every known server.
//! - Inbound frames update the cache last-write-wins; requests are
//!   fire-and-forget and never correlated with responses.
//! - Queries read the cache directly and never touch the network.
//!
//! Nothing in here blocks: sends go through [`Transport::send`] and
//! return immediately, and a missing carrier or malformed frame
//! degrades to a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use tally_protocol::codec;
use tally_protocol::{Request, Response, MESSAGE_CHANNEL};

use crate::cache::CountCache;
use crate::config::Config;
use crate::server_name::ServerName;
use crate::transport::Transport;

/// Player-count tracker: count cache plus refresh controller.
///
/// All operations are callable concurrently from host-driven threads.
/// The tracker is inert until [`activate`](CountTracker::activate) and
/// inert again after [`deactivate`](CountTracker::deactivate); every
/// other operation is a no-op while inactive.
pub struct CountTracker {
    cache: CountCache,
    transport: Arc<dyn Transport>,
    config: Config,
    active: AtomicBool,
}

impl CountTracker {
    /// Create an inactive tracker over the given transport.
    pub fn new(transport: Arc<dyn Transport>, config: Config) -> Self {
        CountTracker {
            cache: CountCache::new(),
            transport,
            config,
            active: AtomicBool::new(false),
        }
    }

    /// Register for inbound frames and connectivity events and start
    /// tracking. Idempotent.
    pub fn activate(&self) {
        if self.active.swap(true, Ordering::SeqCst) {
            return;
        }
        self.transport.register_message_listener(MESSAGE_CHANNEL);
        self.transport.register_connectivity_listener();
        debug!("tracker activated on channel {}", MESSAGE_CHANNEL);
    }

    /// Wipe both count tables (together), then unregister from the
    /// transport. Idempotent.
    pub fn deactivate(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        self.cache.clear();
        self.transport.unregister_message_listener(MESSAGE_CHANNEL);
        self.transport.unregister_connectivity_listener();
        debug!("tracker deactivated");
    }

    /// True between `activate()` and `deactivate()`.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// A network participant connected and can carry messages.
    ///
    /// With an empty cache the roster itself is unknown, so a roster
    /// request goes out; otherwise the new carrier is taken as an
    /// opportunity to refresh every known server's count.
    pub fn on_carrier_joined(&self) {
        if !self.is_active() {
            return;
        }
        if self.cache.is_empty() {
            self.send_request(&Request::ServerList);
        } else {
            self.refresh_known_counts();
        }
    }

    /// A network participant disconnected.
    ///
    /// Known counts are refreshed; membership loss never implies the
    /// roster is unknown, so no roster request is issued here.
    pub fn on_carrier_left(&self) {
        if !self.is_active() {
            return;
        }
        if !self.cache.is_empty() {
            self.refresh_known_counts();
        }
    }

    /// An inbound frame arrived from the host's message dispatch.
    ///
    /// Frames on any channel other than the shared one are not for us.
    /// Malformed frames and unknown sub-channels are discarded without
    /// touching the cache; a corrupt packet must never poison state.
    pub fn on_plugin_message(&self, channel: &str, payload: &[u8]) {
        if !self.is_active() || channel != MESSAGE_CHANNEL {
            return;
        }

        let response = match codec::decode_response(payload) {
            Ok(response) => response,
            Err(err) => {
                trace!("discarding frame on {}: {}", channel, err);
                return;
            }
        };

        match response {
            Response::PlayerCount { server, count } => self.apply_count(&server, count),
            Response::ServerList { servers } => {
                for name in &servers {
                    self.cache.admit(ServerName::new(name));
                }
                debug!("roster response admitted {} server(s)", servers.len());
            }
        }
    }

    /// Resolve a free-form, case-insensitive identifier to a count.
    ///
    /// `"all"` and `"total"` aggregate across every known server; any
    /// other identifier is a server lookup defaulting to 0. Never
    /// blocks, never sends.
    pub fn lookup(&self, identifier: &str) -> u64 {
        match identifier.to_lowercase().as_str() {
            "all" | "total" => self.cache.total(),
            name => self
                .cache
                .count_of(&ServerName::new(name))
                .map(u64::from)
                .unwrap_or(0),
        }
    }

    /// [`lookup`](CountTracker::lookup), rendered as a decimal string
    /// for text-placeholder callers.
    pub fn query(&self, identifier: &str) -> String {
        self.lookup(identifier).to_string()
    }

    /// Read access to the underlying cache (counts and streaks).
    pub fn cache(&self) -> &CountCache {
        &self.cache
    }

    /// The configuration this tracker was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn refresh_known_counts(&self) {
        for server in self.cache.server_names() {
            self.send_request(&Request::player_count(server.as_str()));
        }
    }

    /// Fire-and-forget send via any available carrier.
    ///
    /// No carrier means no send: the request is skipped, not queued.
    /// The next connectivity event is another opportunity.
    fn send_request(&self, request: &Request) {
        let Some(carrier) = self.transport.pick_carrier() else {
            trace!("no carrier available, skipping {:?}", request);
            return;
        };

        let mut payload = Vec::new();
        if let Err(err) = codec::encode_request(request, &mut payload) {
            debug!("failed to encode {:?}: {}", request, err);
            return;
        }

        self.transport.send(MESSAGE_CHANNEL, carrier, &payload);
    }

    /// Apply a count report. The wire carries a signed count; anything
    /// negative is treated like a malformed frame and discarded so the
    /// cache never stores a negative value.
    fn apply_count(&self, server: &str, count: i32) {
        let Ok(count) = u32::try_from(count) else {
            trace!("discarding negative count {} for {}", count, server);
            return;
        };
        self.cache.record_count(ServerName::new(server), count);
    }
}
