//! Handler for short link creation.

use axum::extract::{Query, State};
use axum::http::HeaderMap;

use crate::api::dto::CreateQuery;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip_from_headers;

/// Creates a short link and returns its token.
///
/// # Endpoint
///
/// `POST /?url={encoded}&captcha_token={token}`
///
/// The caller's IP for captcha verification is taken from the configured
/// proxy header (`CF-Connecting-IP` by default).
///
/// # Response
///
/// `200 OK` with the new token as a plain-text body.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or invalid, or if captcha
/// is enabled and verification fails.
pub async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CreateQuery>,
) -> Result<String, AppError> {
    let client_ip = client_ip_from_headers(&headers, &state.client_ip_header);

    state
        .gate
        .create(&query.url, &query.captcha_token, &client_ip)
        .await
}
