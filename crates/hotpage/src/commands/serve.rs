//! `hotpage serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use hotpage_config::{CliSettings, Config};
use hotpage_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover hotpage.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (show reload and timing logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable live reload (default: enabled).
    #[arg(long)]
    live_reload: Option<bool>,

    /// Disable live reload.
    #[arg(long, conflicts_with = "live_reload")]
    no_live_reload: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Resolve flags before moving into CliSettings
        let live_reload_enabled = self.resolve_live_reload_enabled();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            live_reload_enabled,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Site directory: {}",
            config.site_resolved.source_dir.display()
        ));

        if config.live_reload.enabled {
            output.info("Live reload: enabled");
        } else {
            output.info("Live reload: disabled");
        }

        // Build server config and run
        let server_config = server_config_from_config(&config);
        run_server(server_config).await?;

        Ok(())
    }

    /// Resolve `live_reload_enabled` from --live-reload/--no-live-reload flags.
    fn resolve_live_reload_enabled(&self) -> Option<bool> {
        self.no_live_reload.then_some(false).or(self.live_reload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(live_reload: Option<bool>, no_live_reload: bool) -> ServeArgs {
        ServeArgs {
            config: None,
            source_dir: None,
            host: None,
            port: None,
            verbose: false,
            live_reload,
            no_live_reload,
        }
    }

    #[test]
    fn test_resolve_live_reload_defaults_to_config() {
        assert_eq!(args(None, false).resolve_live_reload_enabled(), None);
    }

    #[test]
    fn test_resolve_live_reload_explicit_flag() {
        assert_eq!(
            args(Some(true), false).resolve_live_reload_enabled(),
            Some(true)
        );
        assert_eq!(
            args(Some(false), false).resolve_live_reload_enabled(),
            Some(false)
        );
    }

    #[test]
    fn test_resolve_no_live_reload_wins() {
        assert_eq!(args(None, true).resolve_live_reload_enabled(), Some(false));
    }
}
