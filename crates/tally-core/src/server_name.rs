//! Case-insensitive backend server identifier.

use std::fmt;

/// Name of a backend server behind the proxy.
///
/// The proxy and query callers are inconsistent about casing, so the
/// name is normalized to lower case on construction; two `ServerName`s
/// compare equal whenever they refer to the same backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerName(String);

impl ServerName {
    /// Normalize `raw` into a canonical server name.
    pub fn new(raw: &str) -> Self {
        ServerName(raw.to_lowercase())
    }

    /// The normalized (lower-case) name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServerName {
    fn from(raw: &str) -> Self {
        ServerName::new(raw)
    }
}
