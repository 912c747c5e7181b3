//! Preview page session.
//!
//! A session stands in for an open browser tab: it fetches the page,
//! builds the document model, and runs the page initializer over it.
//! Loading again is the native analogue of a full page reload.

use std::sync::Mutex;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::info;
use ureq::Agent;

use crate::document::{ALERT_CLASS, Document};
use crate::init::PageInit;
use crate::scan::document_from_html;

/// HTTP timeout for page fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Page session error.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The page could not be fetched or read.
    #[error("page fetch failed: {0}")]
    Http(#[from] ureq::Error),
}

/// A loaded page and its bootstrap.
///
/// Fetches are blocking; callers on the async runtime dispatch
/// [`load`](Self::load) through a blocking task.
pub struct PageSession {
    url: String,
    init: PageInit,
    agent: Agent,
    runtime: Handle,
    document: Mutex<Document>,
}

impl PageSession {
    /// Create a session for the given page URL.
    ///
    /// Captures the current tokio runtime for the initializer's timers, so
    /// this must be called from within a runtime.
    #[must_use]
    pub fn new(url: impl Into<String>, init: PageInit) -> Self {
        Self {
            url: url.into(),
            init,
            agent: create_agent(FETCH_TIMEOUT),
            runtime: Handle::current(),
            document: Mutex::new(Document::new()),
        }
    }

    /// Fetch the page and run the initializer over the fresh document.
    ///
    /// Returns the number of notice elements found. The previous document
    /// is replaced wholesale; timers still pending against it keep running
    /// and degrade to no-ops as their elements were never detached from
    /// the old snapshot they reference.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Http`] if the fetch fails or the body cannot
    /// be read.
    pub fn load(&self) -> Result<usize, PageError> {
        let response = self.agent.get(&self.url).call()?;
        let mut body = response.into_body();
        let html = body.read_to_string()?;

        let document = document_from_html(&html);
        let notices = document.elements_with_class(ALERT_CLASS).len();

        // The initializer spawns dismissal timers; enter the runtime in
        // case load() is called from a blocking context.
        {
            let _guard = self.runtime.enter();
            self.init.run(&document);
        }

        *self.document.lock().expect("session lock poisoned") = document;
        info!(url = %self.url, notices, "Page loaded");

        Ok(notices)
    }

    /// Handle to the current document snapshot.
    #[must_use]
    pub fn document(&self) -> Document {
        self.document.lock().expect("session lock poisoned").clone()
    }

    /// The page URL this session tracks.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Create HTTP agent with the specified timeout.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}
