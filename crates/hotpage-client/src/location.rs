//! Page location and development-host gating.
//!
//! The notifier client mirrors a browser page's view of its own address:
//! the hostname decides whether the client activates at all, and the
//! host:port authority is where the reload endpoint lives.

use crate::error::ClientError;

/// WebSocket endpoint path on the dev server.
pub const HOTRELOAD_PATH: &str = "/__hotreload";

/// Hostnames on which the notifier is allowed to run.
///
/// Exact matches only. Anything else (including other loopback spellings
/// such as `[::1]`) disables the client entirely.
const DEV_HOSTNAMES: [&str; 2] = ["localhost", "127.0.0.1"];

/// Returns true if `hostname` identifies a loopback development host.
#[must_use]
pub fn is_dev_host(hostname: &str) -> bool {
    DEV_HOSTNAMES.contains(&hostname)
}

/// The address of a served page, split the way a browser splits `location`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLocation {
    /// Hostname without port (`location.hostname`).
    hostname: String,
    /// Host with port if present (`location.host`).
    host: String,
}

impl PageLocation {
    /// Parse a page URL into a location.
    ///
    /// Accepts `http://` and `https://` URLs. Only the authority is kept;
    /// path and query are irrelevant to the reload endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the URL has no recognized
    /// scheme or an empty authority.
    pub fn parse(url: &str) -> Result<Self, ClientError> {
        let rest = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .ok_or_else(|| ClientError::InvalidUrl(url.to_owned()))?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(ClientError::InvalidUrl(url.to_owned()));
        }

        let hostname = host.split(':').next().unwrap_or_default();

        Ok(Self {
            hostname: hostname.to_owned(),
            host: host.to_owned(),
        })
    }

    /// Hostname without port.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Host with port if the URL carried one.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether the notifier may activate for this location.
    #[must_use]
    pub fn is_dev(&self) -> bool {
        is_dev_host(&self.hostname)
    }

    /// WebSocket URL of the reload endpoint.
    ///
    /// Always the insecure scheme, built from the page's own host:port.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("ws://{}{HOTRELOAD_PATH}", self.host)
    }
}
