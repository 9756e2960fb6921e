//! Cross-origin access for browser front-ends.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Creates a CORS layer admitting `origins`, or `None` when the list is empty.
///
/// A `*` entry allows any origin. Entries that are not valid header values
/// are skipped with a warning.
///
/// # Example
///
/// ```rust,ignore
/// let mut router = Router::new().route("/", post(create_handler));
/// if let Some(cors) = cors::layer(&config.cors_origins) {
///     router = router.layer(cors);
/// }
/// ```
pub fn layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::HEAD, Method::POST])
            .allow_headers(Any),
    )
}
