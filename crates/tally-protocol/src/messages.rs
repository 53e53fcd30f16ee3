//! Logical side-channel messages.
//!
//! These are **transport-agnostic** messages:
//! - [`Request`]: what the tracker sends toward the proxy.
//! - [`Response`]: what the proxy sends back on the shared channel.
//!
//! Server names are carried verbatim here; case normalization is the
//! tracker's concern and happens at its cache boundaries, not on the
//! wire.

/// A request the tracker emits toward the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Ask the proxy which backend servers exist.
    ServerList,

    /// Ask the proxy for the current player count of one server.
    PlayerCount {
        /// Target server name.
        server: String,
    },
}

/// A reply arriving from the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Player count report for a single server.
    ///
    /// The count is a signed 32-bit integer on the wire; consumers
    /// decide what to do with out-of-range values.
    PlayerCount { server: String, count: i32 },

    /// Roster report, already split out of the wire's comma-separated
    /// form with surrounding whitespace trimmed from each name.
    ServerList { servers: Vec<String> },
}

impl Request {
    /// Convenience constructor for a per-server count request.
    pub fn player_count(server: impl Into<String>) -> Self {
        Request::PlayerCount {
            server: server.into(),
        }
    }
}

impl Response {
    /// Convenience constructor for a count report.
    pub fn player_count(server: impl Into<String>, count: i32) -> Self {
        Response::PlayerCount {
            server: server.into(),
            count,
        }
    }

    /// Convenience constructor for a roster report.
    pub fn server_list(servers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Response::ServerList {
            servers: servers.into_iter().map(Into::into).collect(),
        }
    }
}
