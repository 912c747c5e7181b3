//! `hotpage attach` command implementation.
//!
//! Attaches a preview session to a served page: loads the page, runs its
//! bootstrap, and keeps a reload notifier connected so the session follows
//! file changes exactly like an open browser tab would.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use hotpage_client::{PageLocation, ReloadNotifier, Reloader};
use hotpage_config::Config;
use hotpage_page::{PageInit, PageSession};
use tracing::warn;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the attach command.
#[derive(Args)]
pub(crate) struct AttachArgs {
    /// Page URL to attach to (default: server address from config).
    #[arg(short, long)]
    url: Option<String>,

    /// Path to configuration file (default: auto-discover hotpage.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (show connection and reload logs).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Reload target that re-fetches the page and re-runs its bootstrap.
struct SessionReloader(Arc<PageSession>);

impl Reloader for SessionReloader {
    fn reload(&self) {
        if let Err(e) = self.0.load() {
            // Not fatal: the page may be mid-rebuild, the next signal
            // fetches again.
            warn!(error = %e, "Page reload failed");
        }
    }
}

impl AttachArgs {
    /// Execute the attach command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the URL is invalid.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let url = match self.url {
            Some(url) => url,
            None => {
                let config = Config::load(self.config.as_deref(), None)?;
                format!("http://{}:{}/", config.server.host, config.server.port)
            }
        };

        let location = PageLocation::parse(&url)?;
        if !location.is_dev() {
            output.warning(&format!(
                "{url} is not a development host, reload notifications are disabled"
            ));
            return Ok(());
        }

        let session = Arc::new(PageSession::new(url.clone(), PageInit::new()));

        // Initial page load; failure is tolerated since the server may
        // still be starting up.
        let initial = Arc::clone(&session);
        match tokio::task::spawn_blocking(move || initial.load()).await {
            Ok(Ok(notices)) => {
                output.success(&format!("Attached to {url} ({notices} notices)"));
            }
            Ok(Err(e)) => output.warning(&format!("Initial page load failed: {e}")),
            Err(e) => output.warning(&format!("Initial page load failed: {e}")),
        }

        // Runs until interrupted, reconnecting forever.
        let notifier = ReloadNotifier::new(location, Arc::new(SessionReloader(session)));
        notifier.run().await;

        Ok(())
    }
}
