//! Tests for remote catalog resolution against a mocked listing endpoint.

mod common;

use std::time::Duration;

use gemini_catalog::catalog::{
    CatalogResolver, FallbackReason, ModelCatalog, CONNECTION_FAILED_MESSAGE,
    INVALID_FORMAT_MESSAGE, LOAD_FAILED_MESSAGE, NO_GENERATION_MODELS_MESSAGE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{embedding_model, generation_model, mount_listing, resolver_for, TEST_KEY};

#[tokio::test]
async fn empty_credential_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .expect(0)
        .mount(&server)
        .await;

    let resolution = resolver_for(&server).resolve("").await;

    assert_eq!(resolution.catalog, ModelCatalog::default_catalog());
    assert_eq!(resolution.fallback, Some(FallbackReason::NoCredential));
    assert_eq!(resolution.error_message(), None);
}

#[tokio::test]
async fn credential_is_sent_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(query_param("key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [generation_model("models/gemini-2.5-pro")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert!(!resolution.is_fallback());
    assert_eq!(resolution.catalog.ids(), vec!["gemini-2.5-pro"]);
}

#[tokio::test]
async fn higher_major_version_ranks_first() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        200,
        json!({"models": [generation_model("models/foo-1.9"), generation_model("models/foo-2.1")]}),
    )
    .await;

    let (catalog, message) = resolver_for(&server).resolve(TEST_KEY).await.into_parts();

    assert_eq!(catalog.ids(), vec!["foo-2.1", "foo-1.9"]);
    assert_eq!(message, None);
}

#[tokio::test]
async fn higher_minor_version_ranks_first_on_equal_major() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        200,
        json!({"models": [generation_model("models/x-1.5"), generation_model("models/x-1.9")]}),
    )
    .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(resolution.catalog.ids(), vec!["x-1.9", "x-1.5"]);
}

#[tokio::test]
async fn non_generation_models_never_appear() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        200,
        json!({"models": [
            generation_model("models/gemini-2.0-flash"),
            embedding_model("models/text-embedding-004"),
        ]}),
    )
    .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(resolution.catalog.ids(), vec!["gemini-2.0-flash"]);
    assert!(!resolution.catalog.contains("text-embedding-004"));
}

#[tokio::test]
async fn only_non_generation_models_yields_default_catalog() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        200,
        json!({"models": [embedding_model("models/text-embedding-004")]}),
    )
    .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(resolution.catalog, ModelCatalog::default_catalog());
    assert_eq!(resolution.fallback, Some(FallbackReason::EmptyResultSet));
    assert_eq!(
        resolution.error_message().as_deref(),
        Some(NO_GENERATION_MODELS_MESSAGE)
    );
}

#[tokio::test]
async fn server_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        400,
        json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}),
    )
    .await;

    let (catalog, message) = resolver_for(&server).resolve(TEST_KEY).await.into_parts();

    assert_eq!(catalog, ModelCatalog::default_catalog());
    assert_eq!(message.as_deref(), Some("API key not valid"));
}

#[tokio::test]
async fn server_error_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(
        resolution.fallback,
        Some(FallbackReason::ServerError {
            status: 503,
            message: None
        })
    );
    assert_eq!(resolution.error_message().as_deref(), Some(LOAD_FAILED_MESSAGE));
}

#[tokio::test]
async fn missing_models_field_is_a_format_error() {
    let server = MockServer::start().await;
    mount_listing(&server, 200, json!({"nextPageToken": "abc"})).await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(resolution.catalog, ModelCatalog::default_catalog());
    assert_eq!(resolution.fallback, Some(FallbackReason::MalformedResponse));
    assert_eq!(
        resolution.error_message().as_deref(),
        Some(INVALID_FORMAT_MESSAGE)
    );
}

#[tokio::test]
async fn non_json_success_body_is_a_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(resolution.fallback, Some(FallbackReason::MalformedResponse));
}

#[tokio::test]
async fn timeout_is_a_connection_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"models": [generation_model("models/slow-1.0")]}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let resolution = CatalogResolver::new()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(50))
        .resolve(TEST_KEY)
        .await;

    assert_eq!(resolution.catalog, ModelCatalog::default_catalog());
    assert_eq!(resolution.fallback, Some(FallbackReason::ConnectionFailure));
    assert_eq!(
        resolution.error_message().as_deref(),
        Some(CONNECTION_FAILED_MESSAGE)
    );
}

#[tokio::test]
async fn refused_connection_is_a_connection_failure() {
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let resolution = CatalogResolver::new()
        .with_base_url(uri)
        .with_timeout(Duration::from_secs(2))
        .resolve(TEST_KEY)
        .await;

    assert_eq!(resolution.fallback, Some(FallbackReason::ConnectionFailure));
}

#[tokio::test]
async fn duplicate_ids_keep_the_later_entry() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        200,
        json!({"models": [
            {"name": "models/dup-1.0", "displayName": "First", "supportedGenerationMethods": ["generateContent"]},
            {"name": "models/dup-1.0", "displayName": "Second", "supportedGenerationMethods": ["generateContent"]},
        ]}),
    )
    .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(resolution.catalog.len(), 1);
    assert_eq!(
        resolution.catalog.get("dup-1.0").map(|m| m.display_name.as_str()),
        Some("Second")
    );
}

#[tokio::test]
async fn description_is_appended_to_display_name() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        200,
        json!({"models": [{
            "name": "models/gemini-2.5-flash",
            "displayName": "Gemini 2.5 Flash",
            "description": "Fast and versatile",
            "supportedGenerationMethods": ["generateContent"],
        }]}),
    )
    .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(
        resolution.catalog.options(),
        vec![("gemini-2.5-flash", "Gemini 2.5 Flash - Fast and versatile")]
    );
}

#[tokio::test]
async fn repeated_resolution_is_stable() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        200,
        json!({"models": [
            generation_model("models/gemini-1.5-pro"),
            generation_model("models/gemma-3-27b-it"),
            generation_model("models/gemini-2.5-flash"),
            generation_model("models/gemini-2.5-pro"),
            generation_model("models/aqa"),
        ]}),
    )
    .await;

    let resolver = resolver_for(&server);
    let first = resolver.resolve(TEST_KEY).await;
    let second = resolver.resolve(TEST_KEY).await;

    assert_eq!(first.catalog.ids(), second.catalog.ids());
    assert_eq!(
        first.catalog.ids(),
        vec![
            "gemini-2.5-flash",
            "gemini-2.5-pro",
            "gemini-1.5-pro",
            "aqa",
            "gemma-3-27b-it"
        ]
    );
}

#[tokio::test]
async fn mistyped_optional_fields_keep_named_models() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        200,
        json!({"models": [
            {"name": "models/foo-1.0", "displayName": 7, "supportedGenerationMethods": ["generateContent"]},
            {"name": "models/foo-2.0", "description": {"x": 1}, "supportedGenerationMethods": ["generateContent"]},
            {"name": "models/foo-3.0", "supportedGenerationMethods": ["generateContent", null]},
        ]}),
    )
    .await;

    let resolution = resolver_for(&server).resolve(TEST_KEY).await;

    assert_eq!(resolution.error_message(), None);
    assert_eq!(resolution.catalog.ids(), vec!["foo-3.0", "foo-2.0", "foo-1.0"]);
    assert_eq!(resolution.catalog.get("foo-1.0").unwrap().display_name, "foo-1.0");
}
