//! One-shot page initialization.
//!
//! Runs at page-ready time: invokes the icon-rendering hook when one is
//! available and schedules dismissal of every notice element present at
//! that moment. Each notice gets its own independent timer pair, so a
//! notice removed early never affects the others.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::document::{ALERT_CLASS, Document, ElementId};

/// Delay before a notice starts fading.
pub const NOTICE_DISMISS_DELAY: Duration = Duration::from_millis(5000);

/// Time between the fade and the detach.
pub const NOTICE_FADE_DURATION: Duration = Duration::from_millis(300);

/// Icon-rendering capability supplied by the surrounding page.
///
/// Invoked with no arguments; re-invocation must be harmless.
pub type IconRenderer = Arc<dyn Fn() + Send + Sync>;

/// Page initializer.
///
/// Best-effort cosmetic behavior: nothing here surfaces an error. The
/// delays default to the page contract; they are adjustable only so tests
/// can compress time.
#[derive(Clone, Default)]
pub struct PageInit {
    icon_renderer: Option<IconRenderer>,
    dismiss_delay: Option<Duration>,
    fade_duration: Option<Duration>,
}

impl PageInit {
    /// Create an initializer with no icon hook and default delays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the icon-rendering hook.
    #[must_use]
    pub fn with_icon_renderer(mut self, renderer: IconRenderer) -> Self {
        self.icon_renderer = Some(renderer);
        self
    }

    /// Override the dismissal delays (tests only).
    #[must_use]
    pub fn with_delays(mut self, dismiss_delay: Duration, fade_duration: Duration) -> Self {
        self.dismiss_delay = Some(dismiss_delay);
        self.fade_duration = Some(fade_duration);
        self
    }

    /// Run the initializer over the document.
    ///
    /// Returns after spawning the dismissal timers; must be called from
    /// within a tokio runtime. Safe to invoke again on a reloaded document.
    pub fn run(&self, document: &Document) {
        // Optional capability: absent is not an error.
        if let Some(render) = &self.icon_renderer {
            render();
            trace!("Icons rendered");
        }

        let notices = document.elements_with_class(ALERT_CLASS);
        if notices.is_empty() {
            return;
        }
        debug!(count = notices.len(), "Scheduling notice dismissal");

        let dismiss_delay = self.dismiss_delay.unwrap_or(NOTICE_DISMISS_DELAY);
        let fade_duration = self.fade_duration.unwrap_or(NOTICE_FADE_DURATION);

        for id in notices {
            let document = document.clone();
            tokio::spawn(dismiss_notice(document, id, dismiss_delay, fade_duration));
        }
    }
}

/// Fade one notice, then detach it.
///
/// The notice may have been removed in the meantime; both steps tolerate a
/// detached element as a no-op.
async fn dismiss_notice(
    document: Document,
    id: ElementId,
    dismiss_delay: Duration,
    fade_duration: Duration,
) {
    tokio::time::sleep(dismiss_delay).await;
    document.set_opacity(id, 0.0);

    tokio::time::sleep(fade_duration).await;
    if document.detach(id) {
        trace!(?id, "Notice dismissed");
    }
}
