//! Connectivity checks for the generation and vision APIs.
//!
//! Each check sends one small request with the credential and reports a
//! [`ConnectionCheck`]. Like catalog resolution, checks never fail outward.

pub mod messages;

pub use messages::{describe_api_error, describe_error};

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::catalog::DEFAULT_MODELS;
use crate::config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_VISION_BASE_URL};
use crate::error::CatalogError;
use crate::provider::http::{join_url, parse_api_error, shared_client, ApiErrorDetail};

/// 1x1 transparent PNG sent to the vision API.
const PROBE_PNG: [u8; 67] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

const PROBE_PROMPT: &str = "Hello";

/// Which API a check targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckTarget {
    Generation,
    Vision,
}

/// Result of a connectivity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionCheck {
    pub target: CheckTarget,
    pub success: bool,
    pub message: String,
}

impl ConnectionCheck {
    fn ok(target: CheckTarget) -> Self {
        let message = match target {
            CheckTarget::Generation => "Connected to the generation API",
            CheckTarget::Vision => "Connected to the vision API",
        };
        Self {
            target,
            success: true,
            message: message.to_string(),
        }
    }

    fn failed(target: CheckTarget, message: impl Into<String>) -> Self {
        Self {
            target,
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateImageResponse {
    #[serde(default)]
    error: Option<ApiErrorDetail>,
}

/// Runs connectivity checks against configured endpoints.
#[derive(Debug, Clone)]
pub struct ConnectionChecker {
    base_url: String,
    vision_base_url: String,
    timeout: Duration,
}

impl Default for ConnectionChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionChecker {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            vision_base_url: DEFAULT_VISION_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            vision_base_url: config.vision_base_url.clone(),
            timeout: config.timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_vision_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.vision_base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send a one-word prompt to `model_id` (default model when blank).
    pub async fn check_generation(&self, credential: &str, model_id: &str) -> ConnectionCheck {
        let target = CheckTarget::Generation;
        let credential = credential.trim();
        if credential.is_empty() {
            return ConnectionCheck::failed(target, messages::MISSING_KEY_MESSAGE);
        }

        let model_id = model_id.trim();
        let model_id = model_id.strip_prefix("models/").unwrap_or(model_id);
        let model_id = if model_id.is_empty() {
            DEFAULT_MODELS[0].0
        } else {
            model_id
        };

        let url = join_url(&self.base_url, &format!("models/{model_id}:generateContent"));
        let body = json!({
            "contents": [{ "parts": [{ "text": PROBE_PROMPT }] }],
            "generationConfig": { "maxOutputTokens": 8 },
        });

        debug!(model = model_id, "checking generation API");
        match self.post(&url, credential, &body).await {
            Ok(_) => ConnectionCheck::ok(target),
            Err(message) => {
                warn!(model = model_id, %message, "generation API check failed");
                ConnectionCheck::failed(target, message)
            }
        }
    }

    /// Run text detection on a 1x1 image.
    pub async fn check_vision(&self, credential: &str) -> ConnectionCheck {
        let target = CheckTarget::Vision;
        let credential = credential.trim();
        if credential.is_empty() {
            return ConnectionCheck::failed(target, messages::MISSING_KEY_MESSAGE);
        }

        let url = join_url(&self.vision_base_url, "images:annotate");
        let image = base64::engine::general_purpose::STANDARD.encode(PROBE_PNG);
        let body = json!({
            "requests": [{
                "image": { "content": image },
                "features": [{ "type": "TEXT_DETECTION", "maxResults": 1 }],
            }]
        });

        debug!("checking vision API");
        let result = self.post(&url, credential, &body).await.and_then(|resp| {
            // Per-image failures arrive inside a 200 response.
            let parsed: AnnotateResponse = serde_json::from_value(resp).unwrap_or_default();
            match parsed.responses.into_iter().find_map(|r| r.error) {
                Some(detail) => Err(describe_api_error(200, Some(&detail))),
                None => Ok(()),
            }
        });

        match result {
            Ok(()) => ConnectionCheck::ok(target),
            Err(message) => {
                warn!(%message, "vision API check failed");
                ConnectionCheck::failed(target, message)
            }
        }
    }

    /// Run the check for `target`.
    pub async fn check(
        &self,
        target: CheckTarget,
        credential: &str,
        model_id: &str,
    ) -> ConnectionCheck {
        match target {
            CheckTarget::Generation => self.check_generation(credential, model_id).await,
            CheckTarget::Vision => self.check_vision(credential).await,
        }
    }

    /// POST `body`; `Err` carries the user-facing failure message.
    async fn post(&self, url: &str, credential: &str, body: &Value) -> Result<Value, String> {
        let resp = shared_client()
            .post(url)
            .query(&[("key", credential)])
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| describe_error(&CatalogError::Network(e)))?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            let detail = parse_api_error(&text);
            return Err(describe_api_error(status.as_u16(), detail.as_ref()));
        }

        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}
