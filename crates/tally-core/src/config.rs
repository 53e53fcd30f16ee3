//! Tracker configuration.
//!
//! For now this is intentionally simple: use defaults or override via
//! an environment variable:
//!
//! - `TALLY_CHECK_INTERVAL_SECS` (default: "30")

use std::env;
use std::str::FromStr;

/// Default refresh check interval, in seconds.
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Count refresh check interval in seconds.
    ///
    /// Reserved for a periodic refresh task; the tracker currently
    /// refreshes on connectivity events only and does not schedule
    /// anything on this interval.
    pub check_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            check_interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let check_interval_secs =
            read_env_or_default("TALLY_CHECK_INTERVAL_SECS", DEFAULT_CHECK_INTERVAL_SECS)?;

        Ok(Config {
            check_interval_secs,
        })
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::error::Error + 'static,
{
    match env::var(key) {
        Ok(val) => Ok(val.parse::<T>()?),
        Err(_) => Ok(default),
    }
}
