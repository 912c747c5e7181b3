//! Live reload.
//!
//! Watches the site directory and tells connected pages to refresh.

mod debouncer;
mod manager;
mod websocket;

pub(crate) use manager::{LiveReloadManager, ReloadSignal};
pub(crate) use websocket::ws_handler;

/// WebSocket endpoint path clients connect to.
pub(crate) const HOTRELOAD_PATH: &str = "/__hotreload";

/// The payload sent to clients. Clients match it literally.
pub(crate) const RELOAD_PAYLOAD: &str = "reload";
