//! Shared HTTP client and error-body utilities.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::CatalogError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
///
/// Callers set a per-request timeout; the client-level one is only a ceiling.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .pool_max_idle_per_host(4)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// The `error` object of a Google API error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

/// Parse `{"error": {...}}` out of a response body, if it has that shape.
pub fn parse_api_error(body: &str) -> Option<ApiErrorDetail> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error)
}

/// Build an API error from a non-success status and its raw body.
///
/// A non-empty `error.message` is kept verbatim; a missing or empty one
/// leaves the message unset so callers can substitute their own wording.
pub fn status_to_error(status: u16, body: &str) -> CatalogError {
    let message = parse_api_error(body)
        .and_then(|detail| detail.message)
        .filter(|m| !m.is_empty());
    CatalogError::api(status, message)
}

/// Join a base URL and a path without doubling the slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
