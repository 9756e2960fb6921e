//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{token}`  - Resolve a token to its target URL
//! - `POST /`         - Create a short link (`?url=...&captcha_token=...`)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging (path only, no query)
//! - **CORS** - Allowed origins from `CORS_DOMAINS`, off when unset
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{create_handler, resolve_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the API router with tracing and, if configured, CORS.
pub fn api_router(state: AppState, cors_origins: &[String]) -> Router {
    let mut router = Router::new()
        .route("/", post(create_handler))
        .route("/{token}", get(resolve_handler))
        .with_state(state)
        .layer(tracing::layer());

    if let Some(cors) = cors::layer(cors_origins) {
        router = router.layer(cors);
    }

    router
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/aZ09xY/` resolves like
/// `/aZ09xY`.
pub fn app_router(state: AppState, cors_origins: &[String]) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, cors_origins))
}
