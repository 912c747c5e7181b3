//! Static file serving.
//!
//! Serves the site directory as-is. Unlike a production file server there
//! is no SPA fallback: a missing file is a plain 404, which is the most
//! useful answer during local development.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create router for static file serving.
pub(crate) fn static_router(site_dir: &Path) -> Router<Arc<AppState>> {
    let serve_dir = ServeDir::new(site_dir).append_index_html_on_directories(true);
    Router::new().fallback_service(serve_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_router_construction() {
        let _router: Router<Arc<AppState>> = static_router(Path::new("/tmp/site"));
    }
}
