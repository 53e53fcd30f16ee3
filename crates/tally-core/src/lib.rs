//! tally-core
//!
//! Pure player-count tracking logic:
//! - case-insensitive server names
//! - concurrent count cache with unchanged-update streaks
//! - refresh controller driven by connectivity events and inbound frames
//! - the transport interface the host environment must provide

pub mod cache;
pub mod config;
pub mod server_name;
pub mod tracker;
pub mod transport;

pub use cache::CountCache;
pub use config::Config;
pub use server_name::ServerName;
pub use tracker::CountTracker;
pub use transport::{CarrierId, Transport};
