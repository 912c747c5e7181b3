//! Page bootstrap for Hotpage preview sessions.
//!
//! Mirrors what a served page does once at load time:
//!
//! - render icons through an optional hook (silently skipped when absent);
//! - schedule auto-dismissal of transient notice elements: fade after a
//!   fixed delay, detach shortly after.
//!
//! The [`Document`] is a point-in-time model of the page's elements;
//! notices inserted after initialization are not managed. [`PageSession`]
//! ties the pieces together for a fetched page and re-runs the bootstrap
//! whenever the page is reloaded.

mod document;
mod init;
mod scan;
mod session;

pub use document::{ALERT_CLASS, Document, ElementId};
pub use init::{IconRenderer, NOTICE_DISMISS_DELAY, NOTICE_FADE_DURATION, PageInit};
pub use scan::document_from_html;
pub use session::{PageError, PageSession};
