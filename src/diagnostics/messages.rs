//! Human-readable wording for diagnostic failures.

use crate::error::CatalogError;
use crate::provider::ApiErrorDetail;

pub const MISSING_KEY_MESSAGE: &str = "API key is required";
pub const INVALID_KEY_MESSAGE: &str = "Invalid API key";
pub const PERMISSION_DENIED_MESSAGE: &str =
    "API access denied; make sure the API is enabled for this key";
pub const QUOTA_MESSAGE: &str = "API quota exceeded";

/// Map a server error to the message shown on the settings screen.
///
/// Known substrings win over the raw text; unknown errors keep the server's
/// message when there is one.
pub fn describe_api_error(status: u16, detail: Option<&ApiErrorDetail>) -> String {
    let message = detail.and_then(|d| d.message.as_deref()).unwrap_or("");
    let error_status = detail.and_then(|d| d.status.as_deref()).unwrap_or("");

    if message.contains("API key not valid") {
        INVALID_KEY_MESSAGE.to_string()
    } else if message.contains("PERMISSION_DENIED") || error_status == "PERMISSION_DENIED" {
        PERMISSION_DENIED_MESSAGE.to_string()
    } else if message.to_ascii_lowercase().contains("quota") {
        QUOTA_MESSAGE.to_string()
    } else if !message.trim().is_empty() {
        message.to_string()
    } else {
        format!("request failed (status {status})")
    }
}

/// Map a transport-level error to user-facing text.
///
/// Server errors go through [`describe_api_error`], which needs the full
/// error body.
pub fn describe_error(error: &CatalogError) -> String {
    if error.is_connection_failure() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}
