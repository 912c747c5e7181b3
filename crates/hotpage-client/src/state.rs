//! Connection state machine.

/// Connection state of the reload notifier.
///
/// The client cycles `Disconnected → Connecting → Connected` for the
/// lifetime of the page. There is no terminal state: every close or error
/// leads back to `Disconnected` and a timed retry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection; a retry timer may be pending.
    #[default]
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// The duplex connection is open and listening for signals.
    Connected,
}

impl ConnectionState {
    /// Short lowercase name for diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disconnected() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
    }
}
