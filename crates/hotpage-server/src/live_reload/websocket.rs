//! WebSocket handler for live reload.
//!
//! Handles WebSocket connections and forwards reload signals to clients.
//! The wire protocol is a single text frame whose payload is the literal
//! `reload`; clients never send application frames, anything inbound is
//! drained for keepalive only.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast;

use super::RELOAD_PAYLOAD;
use super::manager::ReloadSignal;
use crate::state::AppState;

/// Handle WebSocket upgrade for live reload.
pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let Some(ref live_reload) = state.live_reload else {
        // Live reload not enabled, close connection
        return;
    };

    let mut signals: broadcast::Receiver<ReloadSignal> = live_reload.subscribe();

    loop {
        tokio::select! {
            // Forward reload signals to the page
            result = signals.recv() => {
                match result {
                    Ok(ReloadSignal) => {
                        if socket
                            .send(Message::Text(RELOAD_PAYLOAD.into()))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    // More signals are coming, a lagged page catches up then
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                }
            }
            // Drain client frames (keepalive only)
            result = socket.recv() => {
                match result {
                    Some(Ok(_)) => {}
                    _ => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live_reload::LiveReloadManager;
    use axum::Router;
    use axum::routing::get;
    use futures_util::StreamExt;
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite;

    /// Bind the live reload route on an ephemeral port.
    ///
    /// The manager is not started, so the broadcast sender fully controls
    /// what the socket sees.
    async fn serve_ws(state: Arc<AppState>) -> std::net::SocketAddr {
        let app = Router::new()
            .route(super::super::HOTRELOAD_PATH, get(ws_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_signal_is_forwarded_as_literal_reload() {
        let (tx, _rx) = broadcast::channel(8);
        let manager = LiveReloadManager::new(PathBuf::from("/unused"), None, tx.clone());
        let state = Arc::new(AppState {
            live_reload: Some(manager),
        });

        let addr = serve_ws(state).await;
        let (mut ws, _) = connect_async(format!("ws://{addr}/__hotreload"))
            .await
            .unwrap();

        // The page may still be registering its subscription; retry until
        // the broadcast reaches it.
        let frame = timeout(Duration::from_secs(5), async {
            loop {
                let _ = tx.send(ReloadSignal);
                match timeout(Duration::from_millis(100), ws.next()).await {
                    Ok(Some(Ok(frame))) => break frame,
                    Ok(_) => panic!("socket closed unexpectedly"),
                    Err(_) => {}
                }
            }
        })
        .await
        .expect("no frame received");

        assert_eq!(frame, tungstenite::Message::Text("reload".into()));
    }

    #[tokio::test]
    async fn test_socket_closes_when_live_reload_disabled() {
        let state = Arc::new(AppState { live_reload: None });

        let addr = serve_ws(state).await;
        let (mut ws, _) = connect_async(format!("ws://{addr}/__hotreload"))
            .await
            .unwrap();

        let frame = timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("expected the server to close the socket");
        assert!(matches!(
            frame,
            None | Some(Ok(tungstenite::Message::Close(_))) | Some(Err(_))
        ));
    }
}
