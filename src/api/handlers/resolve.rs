//! Handler for short token lookup.

use axum::extract::{Path, State};

use crate::error::AppError;
use crate::state::AppState;

/// Returns the target URL stored for a token.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Response
///
/// `200 OK` with the target URL as a plain-text body. The service does not
/// redirect; the client decides what to do with the URL.
///
/// # Errors
///
/// Returns 404 Not Found if the store is empty or the token is unknown.
pub async fn resolve_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<String, AppError> {
    state.store.resolve(&token)
}
