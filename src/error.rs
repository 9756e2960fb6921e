//! Error vocabulary shared by the token store, the submission gate and the
//! HTTP layer.
//!
//! Every variant is a terminal, user-visible outcome mapped 1:1 to a
//! rejection response. There are no retries and no partial successes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors returned by the core operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// The token is unknown, or the store is empty.
    #[error("Short link not found")]
    NotFound,

    /// The submitted URL is missing or malformed.
    #[error("Invalid URL: {0}")]
    Invalid(String),

    /// Captcha enforcement is on and the proof was missing, the caller IP was
    /// unusable, or the verification service denied or failed.
    #[error("Captcha verification failed")]
    Unauthorized,
}

impl AppError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    /// HTTP status for the reference binding.
    ///
    /// A failed captcha is reported as `400 Bad Request`, not `401`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Invalid(_) | AppError::Unauthorized => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
