//! Reload notifier client for Hotpage.
//!
//! Connects to a dev server's `/__hotreload` WebSocket endpoint and triggers
//! a page reload whenever the server broadcasts the reload signal. The client
//! only activates when the page is served from a loopback development host;
//! on any other host it does nothing and opens no connection.
//!
//! Connection loss is never fatal: the client retries on a fixed interval
//! for as long as it runs.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use hotpage_client::{PageLocation, ReloadNotifier, Reloader};
//!
//! struct LogReloader;
//!
//! impl Reloader for LogReloader {
//!     fn reload(&self) {
//!         println!("page reloaded");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let location = PageLocation::parse("http://localhost:7878/").unwrap();
//!     let notifier = ReloadNotifier::new(location, Arc::new(LogReloader));
//!     notifier.run().await;
//! }
//! ```

mod error;
mod location;
mod notifier;
mod state;

pub use error::ClientError;
pub use location::{HOTRELOAD_PATH, PageLocation, is_dev_host};
pub use notifier::{NotifierOptions, RELOAD_PAYLOAD, ReloadNotifier, Reloader};
pub use state::ConnectionState;
