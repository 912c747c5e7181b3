//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::live_reload;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `site_dir` - Directory to serve static files from
pub(crate) fn create_router(state: Arc<AppState>, site_dir: &Path) -> Router {
    let mut router = Router::new();

    // WebSocket for live reload
    if state.live_reload_enabled() {
        router = router.route(live_reload::HOTRELOAD_PATH, get(live_reload::ws_handler));
    }

    // Static files for the site itself
    router = router.merge(static_files::static_router(site_dir));

    // Add security headers middleware
    router
        .layer(
            ServiceBuilder::new()
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
