//! Configuration system (layered: code > env > defaults).

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

/// Production endpoint for model listing and content generation.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Production endpoint for the OCR-style vision API.
pub const DEFAULT_VISION_BASE_URL: &str = "https://vision.googleapis.com/v1";

/// Client-side timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Global default config (lazy-initialized from env).
static DEFAULT_CONFIG: OnceLock<CatalogConfig> = OnceLock::new();

/// Endpoints, credentials, and timeout shared by the resolver and the
/// connectivity checks.
#[derive(Clone)]
pub struct CatalogConfig {
    pub generation_api_key: Option<String>,
    pub vision_api_key: Option<String>,
    pub base_url: String,
    pub vision_base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("generation_api_key", &self.generation_api_key.as_ref().map(|_| ".."))
            .field("vision_api_key", &self.vision_api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("vision_base_url", &self.vision_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogConfig {
    /// Config with production endpoints, no credentials, and the default timeout.
    pub fn new() -> Self {
        Self {
            generation_api_key: None,
            vision_api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            vision_base_url: DEFAULT_VISION_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load from environment variables (GEMINI_API_KEY, GOOGLE_VISION_API_KEY, etc.).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        for env_var in ["GOOGLE_API_KEY", "GEMINI_API_KEY"] {
            if let Some(key) = non_empty_env(env_var) {
                config.generation_api_key = Some(key);
            }
        }
        config.vision_api_key = non_empty_env("GOOGLE_VISION_API_KEY");

        if let Some(url) = non_empty_env("GEMINI_BASE_URL") {
            config.base_url = url;
        }
        if let Some(url) = non_empty_env("GOOGLE_VISION_BASE_URL") {
            config.vision_base_url = url;
        }

        if let Some(raw) = non_empty_env("CATALOG_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "ignoring invalid CATALOG_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// Get (or create) the global default config.
    pub fn global() -> &'static CatalogConfig {
        DEFAULT_CONFIG.get_or_init(Self::from_env)
    }

    pub fn with_generation_api_key(mut self, key: impl Into<String>) -> Self {
        self.generation_api_key = Some(key.into());
        self
    }

    pub fn with_vision_api_key(mut self, key: impl Into<String>) -> Self {
        self.vision_api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_vision_base_url(mut self, url: impl Into<String>) -> Self {
        self.vision_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
