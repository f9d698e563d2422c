//! Wire-level tests for the PassKit client.
//!
//! Every test points the client at a local wiremock server, so a test run
//! performs zero real network calls while still exercising the full HTTP
//! stack: basic auth, JSON bodies, envelope parsing, error mapping, and
//! retry behavior.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use passkit::testing::TestRunConfig;
use passkit::{ApiError, Credentials, Error, PasskitClient, RetryConfig};

/// Basic auth header for the "user"/"secret" pair used throughout.
const BASIC_AUTH: &str = "Basic dXNlcjpzZWNyZXQ=";

fn test_credentials() -> Credentials {
    Credentials::new("user", "secret")
}

/// Client pointed at the mock server, with fast deterministic retries.
fn mocked_client(server: &MockServer, retry: Option<RetryConfig>) -> PasskitClient {
    PasskitClient::new(
        test_credentials(),
        Some(&server.uri()),
        Some(Duration::from_secs(5)),
        retry,
    )
    .expect("Client creation should succeed")
}

fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        backoff_factor: 2.0,
        jitter: 0.0,
        max_backoff: 0.05,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_mocked_run_config_keeps_traffic_on_the_mock_server() {
    // A mocked run carries its credentials explicitly and never enables the
    // live-server path; every request lands on the interception server.
    let config = TestRunConfig::mocked(test_credentials());
    assert!(!config.live_server);
    assert!(!config.full_suite);

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "templates": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = config.credentials.expect("Mocked config carries credentials");
    let client = PasskitClient::new(creds, Some(&server.uri()), None, None)
        .expect("Client creation should succeed");

    let templates = client
        .templates()
        .list()
        .await
        .expect("List should succeed");
    assert!(templates.is_empty());
}

#[tokio::test]
async fn test_list_templates_sends_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "templates": ["coffee-card", "loyalty"] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, None);
    let templates = client
        .templates()
        .list()
        .await
        .expect("List should succeed");

    assert_eq!(templates, vec!["coffee-card".to_string(), "loyalty".to_string()]);
}

#[tokio::test]
async fn test_template_field_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/templates/coffee-card/fieldnames"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "templateName": "coffee-card",
                "fields": [
                    { "name": "memberName", "label": "Member", "required": true },
                    { "name": "points", "label": "Points", "defaultValue": "0" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, None);
    let schema = client
        .templates()
        .field_names("coffee-card")
        .await
        .expect("Field names should succeed");

    assert_eq!(schema.template_name, "coffee-card");
    assert_eq!(schema.fields.len(), 2);
    assert!(schema.fields[0].required);
    assert_eq!(schema.fields[1].default_value.as_deref(), Some("0"));
}

#[tokio::test]
async fn test_issue_pass_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/passes"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_json(json!({
            "template": "coffee-card",
            "fields": { "memberName": "Ada" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "passId": "pass-123",
                "templateName": "coffee-card",
                "serialNumber": "SN-0001",
                "url": "https://pass.example.com/p/pass-123",
                "status": "issued",
                "fields": { "memberName": "Ada" },
                "createdAt": "2024-01-15T10:30:00Z",
                "invalidatedAt": null
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, None);
    let mut fields = HashMap::new();
    fields.insert("memberName".to_string(), Value::String("Ada".to_string()));

    let pass = client
        .passes()
        .issue("coffee-card", fields)
        .await
        .expect("Issue should succeed");

    assert_eq!(pass.pass_id, "pass-123");
    assert_eq!(pass.serial_number, "SN-0001");
    assert!(pass.is_valid());
}

#[tokio::test]
async fn test_update_and_invalidate_pass() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/passes/pass-123"))
        .and(body_json(json!({ "fields": { "points": 10 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "passId": "pass-123",
                "templateName": "coffee-card",
                "serialNumber": "SN-0001",
                "url": "https://pass.example.com/p/pass-123",
                "status": "issued",
                "fields": { "points": 10 },
                "createdAt": "2024-01-15T10:30:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/passes/pass-123/invalidate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "passId": "pass-123",
                "templateName": "coffee-card",
                "serialNumber": "SN-0001",
                "url": "https://pass.example.com/p/pass-123",
                "status": "invalidated",
                "createdAt": "2024-01-15T10:30:00Z",
                "invalidatedAt": "2024-02-01T08:00:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, None);

    let mut fields = HashMap::new();
    fields.insert("points".to_string(), json!(10));
    let updated = client
        .passes()
        .update("pass-123", fields)
        .await
        .expect("Update should succeed");
    assert_eq!(updated.fields["points"], 10);

    let invalidated = client
        .passes()
        .invalidate("pass-123")
        .await
        .expect("Invalidate should succeed");
    assert!(!invalidated.is_valid());
    assert!(invalidated.invalidated_at.is_some());
}

#[tokio::test]
async fn test_not_found_maps_to_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/passes/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "PASS_NOT_FOUND", "message": "Pass not found" },
            "meta": { "requestId": "req-42" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, None);
    let err = client
        .passes()
        .get("missing")
        .await
        .expect_err("Get should fail");

    match err {
        Error::Api(ApiError::NotFound {
            code, request_id, ..
        }) => {
            assert_eq!(code, "PASS_NOT_FOUND");
            assert_eq!(request_id.as_deref(), Some("req-42"));
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_credentials_map_to_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": "INVALID_CREDENTIALS", "message": "Credential pair rejected" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, None);
    let err = client
        .templates()
        .list()
        .await
        .expect_err("List should fail");

    match err {
        Error::Api(ApiError::Authentication { code, .. }) => {
            assert_eq!(code, "INVALID_CREDENTIALS");
        }
        other => panic!("Expected Authentication, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_invalidated_pass_maps_to_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/passes/pass-123"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": { "code": "PASS_INVALIDATED", "message": "Pass has been invalidated" },
            "meta": { "requestId": "req-9" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, None);
    let mut fields = HashMap::new();
    fields.insert("points".to_string(), json!(10));

    let err = client
        .passes()
        .update("pass-123", fields)
        .await
        .expect_err("Update should fail");

    match err {
        Error::Api(ApiError::Conflict {
            code, request_id, ..
        }) => {
            assert_eq!(code, "PASS_INVALIDATED");
            assert_eq!(request_id.as_deref(), Some("req-9"));
        }
        other => panic!("Expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_surfaces_after_retries_exhausted() {
    let server = MockServer::start().await;

    // Persistent 500: one initial attempt plus one retry, then the typed
    // error comes back to the caller.
    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": "INTERNAL_ERROR", "message": "Internal server error" }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = mocked_client(&server, Some(fast_retry(1)));
    let err = client
        .templates()
        .list()
        .await
        .expect_err("List should fail after retries");

    match err {
        Error::Api(ApiError::Server { code, .. }) => {
            assert_eq!(code, "INTERNAL_ERROR");
        }
        other => panic!("Expected Server, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    // First attempt fails with a retryable status, second succeeds.
    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": "UNAVAILABLE", "message": "Try again" }
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "templates": ["coffee-card"] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, Some(fast_retry(2)));
    let templates = client
        .templates()
        .list()
        .await
        .expect("List should succeed after retry");

    assert_eq!(templates, vec!["coffee-card".to_string()]);
}

#[tokio::test]
async fn test_validation_error_is_not_retried() {
    let server = MockServer::start().await;

    // expect(1) makes wiremock fail verification if the client retries.
    Mock::given(method("POST"))
        .and(path("/v1/passes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": "MISSING_FIELD", "message": "Required field memberName missing" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, Some(fast_retry(3)));
    let err = client
        .passes()
        .issue("coffee-card", HashMap::new())
        .await
        .expect_err("Issue should fail");

    match err {
        Error::Api(ApiError::Validation { code, .. }) => {
            assert_eq!(code, "MISSING_FIELD");
        }
        other => panic!("Expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_honors_retry_after_and_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({
                    "error": { "code": "RATE_LIMITED", "message": "Too many requests" }
                })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = mocked_client(&server, Some(fast_retry(1)));
    let err = client
        .templates()
        .list()
        .await
        .expect_err("List should fail after retries");

    match err {
        Error::Api(ApiError::RateLimited {
            code, retry_after, ..
        }) => {
            assert_eq!(code, "RATE_LIMITED");
            assert_eq!(retry_after, 0);
        }
        other => panic!("Expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_error_body_still_maps_by_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = mocked_client(&server, None);
    let err = client
        .templates()
        .list()
        .await
        .expect_err("List should fail");

    match err {
        Error::Api(ApiError::Authorization { code, message, .. }) => {
            assert_eq!(code, "UNKNOWN_ERROR");
            assert_eq!(message, "HTTP 403");
        }
        other => panic!("Expected Authorization, got {other:?}"),
    }
}
