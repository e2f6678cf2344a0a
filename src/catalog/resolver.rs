//! Remote model discovery with default-catalog fallback.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::{
    parse_models_response, CatalogResolution, FallbackReason, ModelCatalog, ModelDescriptor,
};
use crate::config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::Result;
use crate::provider::http::{join_url, shared_client, status_to_error};

/// Resolves the model catalog available to a credential.
///
/// Stateless apart from its endpoint and timeout: every call issues at most
/// one request and builds a fresh catalog.
#[derive(Debug, Clone)]
pub struct CatalogResolver {
    base_url: String,
    timeout: Duration,
}

impl Default for CatalogResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogResolver {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve the catalog for `credential`.
    ///
    /// Never fails: any problem yields the default catalog and a
    /// [`FallbackReason`]. A blank credential makes no request.
    pub async fn resolve(&self, credential: &str) -> CatalogResolution {
        let credential = credential.trim();
        if credential.is_empty() {
            debug!("no credential supplied, using default model catalog");
            return CatalogResolution::defaulted(FallbackReason::NoCredential);
        }

        let entries = match self.fetch_models(credential).await {
            Ok(entries) => entries,
            Err(error) => {
                let reason = FallbackReason::from_error(&error);
                warn!(
                    error = %error,
                    category = %error.category(),
                    reason = %reason,
                    "model listing failed, using default model catalog"
                );
                return CatalogResolution::defaulted(reason);
            }
        };

        let reported = entries.len();
        let catalog = ModelCatalog::from_entries(entries);
        if catalog.is_empty() {
            warn!(
                reported,
                "no generation-capable models reported, using default model catalog"
            );
            return CatalogResolution::defaulted(FallbackReason::EmptyResultSet);
        }

        debug!(reported, kept = catalog.len(), "resolved model catalog");
        CatalogResolution::discovered(catalog)
    }

    async fn fetch_models(&self, credential: &str) -> Result<Vec<ModelDescriptor>> {
        let url = join_url(&self.base_url, "models");
        debug!(
            base_url = %self.base_url,
            timeout_ms = self.timeout.as_millis() as u64,
            "listing models"
        );

        let resp = shared_client()
            .get(&url)
            .query(&[("key", credential)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        let body_text = resp.text().await?;
        if !status.is_success() {
            return Err(status_to_error(status.as_u16(), &body_text));
        }

        let body: Value = serde_json::from_str(&body_text)?;
        parse_models_response(&body)
    }
}

/// Resolve against the endpoint of [`CatalogConfig::global`].
///
/// Always uses [`DEFAULT_TIMEOUT`]; build a [`CatalogResolver`] to change it.
pub async fn resolve_catalog(credential: &str) -> CatalogResolution {
    default_resolver(CatalogConfig::global())
        .resolve(credential)
        .await
}

fn default_resolver(config: &CatalogConfig) -> CatalogResolver {
    CatalogResolver::new().with_base_url(config.base_url.clone())
}
