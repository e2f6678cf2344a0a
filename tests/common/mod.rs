//! Shared test helpers for mocked Gemini endpoints.

#![allow(dead_code)]

use std::time::Duration;

use gemini_catalog::catalog::CatalogResolver;
use gemini_catalog::diagnostics::ConnectionChecker;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "test-key";

/// A listing entry that supports content generation.
pub fn generation_model(name: &str) -> Value {
    json!({
        "name": name,
        "supportedGenerationMethods": ["generateContent", "countTokens"],
    })
}

/// A listing entry that only supports embeddings.
pub fn embedding_model(name: &str) -> Value {
    json!({
        "name": name,
        "supportedGenerationMethods": ["embedContent"],
    })
}

/// Serve `GET /models` with `status` and `body`.
pub async fn mount_listing(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub fn resolver_for(server: &MockServer) -> CatalogResolver {
    CatalogResolver::new()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(2))
}

pub fn checker_for(server: &MockServer) -> ConnectionChecker {
    ConnectionChecker::new()
        .with_base_url(server.uri())
        .with_vision_base_url(server.uri())
        .with_timeout(Duration::from_secs(2))
}
