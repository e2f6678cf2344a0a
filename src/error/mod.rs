//! Error types for gemini-catalog.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

/// Primary error type for catalog, diagnostics, and settings operations.
///
/// Catalog resolution never surfaces this type to callers: every failure is
/// folded into a [`FallbackReason`](crate::catalog::FallbackReason). It is
/// used for the plumbing underneath and for the settings store.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no error message"))]
    Api {
        status: u16,
        /// `error.message` from the response body, when the server sent one.
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings file error: {0}")]
    Settings(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<toml::de::Error> for CatalogError {
    fn from(error: toml::de::Error) -> Self {
        Self::Settings(error.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Settings(error.to_string())
    }
}

impl CatalogError {
    /// Create an API error from a status and an optional server message.
    pub fn api(status: u16, message: Option<String>) -> Self {
        Self::Api { status, message }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(e) if e.is_timeout() => ErrorCategory::Timeout,
            Self::Network(_) => ErrorCategory::Network,
            Self::InvalidArgument(_) => ErrorCategory::Configuration,
            Self::Serialization(_) | Self::MalformedResponse(_) => ErrorCategory::Serialization,
            Self::Io(_) | Self::Settings(_) => ErrorCategory::Storage,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
        }
    }

    /// Whether this error is a failure to reach the remote service at all.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Timeout
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CatalogError>;
