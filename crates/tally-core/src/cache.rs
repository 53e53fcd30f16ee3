//! Shared count tables.
//!
//! Two concurrent maps, written by the inbound-message path and read by
//! arbitrarily many query callers:
//! - counts: server -> last received player count
//! - unchanged: server -> consecutive updates that repeated the stored
//!   value
//!
//! Every access is a single-key atomic operation; nothing here needs a
//! cross-key transaction, so a sharded map is used instead of a global
//! lock. The two tables are cleared together and only together.

use dashmap::DashMap;

use crate::server_name::ServerName;

/// Concurrent player-count table with per-server unchanged-update
/// streaks.
#[derive(Debug, Default)]
pub struct CountCache {
    counts: DashMap<ServerName, u32>,
    unchanged: DashMap<ServerName, u32>,
}

impl CountCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        CountCache::default()
    }

    /// Store a freshly received count for `server`, last-write-wins.
    ///
    /// If the count repeats the stored value, the server's streak is
    /// incremented (created at 0 first when absent); any change resets
    /// the streak to 0. A streak entry is only ever recorded here,
    /// alongside a count, so every streak key is also a count key.
    pub fn record_count(&self, server: ServerName, count: u32) {
        let previous = self.counts.get(&server).map(|entry| *entry.value());

        if previous == Some(count) {
            *self.unchanged.entry(server.clone()).or_insert(0) += 1;
        } else {
            self.unchanged.insert(server.clone(), 0);
        }

        self.counts.insert(server, count);
    }

    /// Admit a server discovered via a roster response.
    ///
    /// Inserts a 0 count only if the server is unknown; a roster
    /// refresh never clobbers a count that has already been reported.
    pub fn admit(&self, server: ServerName) {
        self.counts.entry(server).or_insert(0);
    }

    /// Last stored count for `server`, if any has been reported or the
    /// server has been admitted from a roster.
    pub fn count_of(&self, server: &ServerName) -> Option<u32> {
        self.counts.get(server).map(|entry| *entry.value())
    }

    /// Consecutive unchanged updates recorded for `server`.
    pub fn streak_of(&self, server: &ServerName) -> Option<u32> {
        self.unchanged.get(server).map(|entry| *entry.value())
    }

    /// Sum of all stored counts (0 for an empty cache).
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|entry| u64::from(*entry.value())).sum()
    }

    /// Snapshot of the currently known server names.
    pub fn server_names(&self) -> Vec<ServerName> {
        self.counts.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of known servers.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no server has been discovered yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Wipe both tables, as a pair.
    pub fn clear(&self) {
        self.counts.clear();
        self.unchanged.clear();
    }
}
