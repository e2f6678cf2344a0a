//! Transport helpers for the Gemini and Vision REST APIs.

pub mod http;

pub use http::{join_url, parse_api_error, shared_client, status_to_error, ApiErrorDetail};
