//! Reconnecting reload notifier.
//!
//! Owns the WebSocket connection to the dev server's reload endpoint and
//! drives the `Disconnected → Connecting → Connected` cycle. A fresh socket
//! is opened for every attempt; the previous handle is dropped, never reused.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::location::PageLocation;
use crate::state::ConnectionState;

/// The only payload the client recognizes.
///
/// Any other inbound frame (different text, binary, control) is ignored.
pub const RELOAD_PAYLOAD: &str = "reload";

/// Fixed delay between the end of one connection and the next attempt.
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(1000);

/// The page-side reload trigger.
///
/// Implementations are invoked exactly once per recognized reload signal.
/// The call may block; the notifier dispatches it off the async executor.
pub trait Reloader: Send + Sync {
    /// Perform a full page reload.
    fn reload(&self);
}

/// Notifier tuning knobs.
///
/// The defaults are the contract; tests compress the retry interval to keep
/// reconnect scenarios fast.
#[derive(Clone, Debug)]
pub struct NotifierOptions {
    /// Delay between a close/error and the next connection attempt.
    pub retry_interval: Duration,
}

impl Default for NotifierOptions {
    fn default() -> Self {
        Self {
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

/// Reconnecting client for the `/__hotreload` endpoint.
///
/// [`run`](Self::run) returns immediately when the page location is not a
/// development host. On a development host it never returns: every close or
/// error leads to a timed retry, with no attempt cap and no backoff growth.
pub struct ReloadNotifier {
    location: PageLocation,
    reloader: Arc<dyn Reloader>,
    options: NotifierOptions,
    state_tx: watch::Sender<ConnectionState>,
}

impl ReloadNotifier {
    /// Create a notifier with default options.
    #[must_use]
    pub fn new(location: PageLocation, reloader: Arc<dyn Reloader>) -> Self {
        Self::with_options(location, reloader, NotifierOptions::default())
    }

    /// Create a notifier with explicit options.
    #[must_use]
    pub fn with_options(
        location: PageLocation,
        reloader: Arc<dyn Reloader>,
        options: NotifierOptions,
    ) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            location,
            reloader,
            options,
            state_tx,
        }
    }

    /// Subscribe to connection state transitions.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Run the notifier.
    ///
    /// Performs the hard development-host check first: for any hostname
    /// outside the permitted set this returns without opening a connection.
    pub async fn run(&self) {
        if !self.location.is_dev() {
            debug!(
                hostname = self.location.hostname(),
                "Not a development host, reload notifier disabled"
            );
            return;
        }

        let url = self.location.endpoint_url();

        loop {
            self.set_state(ConnectionState::Connecting);

            match connect_async(url.as_str()).await {
                Ok((socket, _)) => {
                    info!(url = %url, "Hot reload connected");
                    self.set_state(ConnectionState::Connected);
                    self.listen(socket).await;
                }
                Err(e) => {
                    debug!(url = %url, error = %e, "Hot reload connection failed");
                }
            }

            self.set_state(ConnectionState::Disconnected);
            info!(
                retry_ms = self.options.retry_interval.as_millis(),
                "Hot reload disconnected, retrying"
            );
            tokio::time::sleep(self.options.retry_interval).await;
        }
    }

    /// Listen on an established connection until it closes or errors.
    async fn listen(&self, mut socket: WebSocketStream<MaybeTlsStream<TcpStream>>) {
        while let Some(message) = socket.next().await {
            match message {
                Ok(Message::Text(payload)) if payload.as_str() == RELOAD_PAYLOAD => {
                    info!("Reload signal received, reloading page");
                    let reloader = Arc::clone(&self.reloader);
                    // The reload callback may block (HTTP fetch), keep it off
                    // the async executor.
                    let _ = tokio::task::spawn_blocking(move || reloader.reload()).await;
                }
                Ok(Message::Close(_)) => {
                    debug!("Hot reload connection closed by server");
                    break;
                }
                // Unrecognized payloads and control frames are not errors.
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Hot reload connection error");
                    // Force-close the handle before transitioning to retry.
                    let _ = socket.close(None).await;
                    break;
                }
            }
        }
    }

    /// Record a state transition.
    fn set_state(&self, next: ConnectionState) {
        let previous = self.state_tx.send_replace(next);
        if previous != next {
            debug!(from = %previous, to = %next, "Reload notifier state change");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_retry_interval_is_one_second() {
        assert_eq!(
            NotifierOptions::default().retry_interval,
            Duration::from_millis(1000)
        );
    }

    #[test]
    fn test_reload_payload_literal() {
        assert_eq!(RELOAD_PAYLOAD, "reload");
    }

    #[test]
    fn test_initial_state_is_disconnected() {
        struct NoopReloader;
        impl Reloader for NoopReloader {
            fn reload(&self) {}
        }

        let location = PageLocation::parse("http://localhost:7878/").unwrap();
        let notifier = ReloadNotifier::new(location, Arc::new(NoopReloader));
        assert_eq!(*notifier.state().borrow(), ConnectionState::Disconnected);
    }
}
