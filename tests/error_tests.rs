//! Tests for the error system.

use gemini_catalog::error::*;

#[test]
fn api_error_display_with_and_without_message() {
    let err = CatalogError::api(400, Some("API key not valid".to_string()));
    assert_eq!(err.to_string(), "API error (status 400): API key not valid");

    let err = CatalogError::api(502, None);
    assert_eq!(err.to_string(), "API error (status 502): no error message");
}

#[test]
fn error_categories_are_stable() {
    let network_error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    let serde_error = serde_json::from_str::<serde_json::Value>("{not-json}").unwrap_err();

    let cases = vec![
        (CatalogError::api(401, None), ErrorCategory::Authentication),
        (CatalogError::api(429, None), ErrorCategory::RateLimit),
        (CatalogError::api(503, None), ErrorCategory::Server),
        (CatalogError::api(404, None), ErrorCategory::Api),
        (CatalogError::Network(network_error), ErrorCategory::Network),
        (CatalogError::Serialization(serde_error), ErrorCategory::Serialization),
        (
            CatalogError::MalformedResponse("no models".into()),
            ErrorCategory::Serialization,
        ),
        (CatalogError::Settings("bad toml".into()), ErrorCategory::Storage),
        (
            CatalogError::InvalidArgument("unknown model".into()),
            ErrorCategory::Configuration,
        ),
    ];

    for (error, category) in cases {
        assert_eq!(error.category(), category, "category for {error}");
    }
}

#[test]
fn connection_failures_are_network_errors() {
    let network_error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    assert!(CatalogError::Network(network_error).is_connection_failure());
    assert!(!CatalogError::api(500, None).is_connection_failure());
}

#[test]
fn toml_errors_convert_to_settings_errors() {
    let toml_error = toml::from_str::<toml::Table>("= broken").unwrap_err();
    let err: CatalogError = toml_error.into();
    assert!(matches!(err, CatalogError::Settings(_)));
}
