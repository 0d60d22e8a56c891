//! End-to-end tests against a local mock server.

use parallel_core::{ExtractRequest, SearchRequest};
use parallel_fetch::{
    ApiClient, ClientSettings, FetchError, ReqwestTransport, RetryPolicy,
    StaticCredentialSource,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "wiremock-key-abcdefghijklmnop";

fn client(server: &MockServer, retry: RetryPolicy) -> ApiClient {
    ApiClient::new(
        Arc::new(ReqwestTransport::new().unwrap()),
        Arc::new(StaticCredentialSource::new(None, Some(KEY))),
        ClientSettings::default()
            .with_base_url(server.uri())
            .with_retry(retry),
    )
}

#[tokio::test]
async fn test_search_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/search"))
        .and(header("x-api-key", KEY))
        .and(header("parallel-beta", "search-extract-2025-10-10"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "objective": "rust web frameworks",
            "max_results": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "search_id": "search_123",
            "results": [
                {
                    "url": "https://example.com/axum",
                    "title": "Axum",
                    "excerpts": ["Ergonomic and modular"]
                }
            ],
            "warnings": [{ "type": "info", "message": "cached" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest::for_objective("rust web frameworks").with_max_results(3);
    let response = client(&server, RetryPolicy::default())
        .execute_with_retry(&request)
        .await
        .unwrap();

    assert_eq!(response.search_id, "search_123");
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].title.as_deref(), Some("Axum"));
    assert_eq!(response.warnings.unwrap()[0].message, "cached");
}

#[tokio::test]
async fn test_extract_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/extract"))
        .and(body_json(serde_json::json!({
            "urls": ["https://example.com/post"],
            "excerpts": true,
            "full_content": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "extract_id": "extract_9",
            "results": [],
            "errors": [
                { "url": "https://example.com/post", "message": "fetch failed" }
            ]
        })))
        .mount(&server)
        .await;

    let request = ExtractRequest::for_url("https://example.com/post")
        .unwrap()
        .with_content(false, false);
    let response = client(&server, RetryPolicy::default())
        .execute(&request)
        .await
        .unwrap();

    assert_eq!(response.extract_id, "extract_9");
    assert_eq!(response.errors.unwrap()[0].message, "fetch failed");
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, RetryPolicy::default())
        .execute_with_retry(&SearchRequest::for_objective("x"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Invalid API key"));
}

#[tokio::test]
async fn test_server_error_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "search_id": "after_retry",
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let retry = RetryPolicy::default().with_base_delay(Duration::from_millis(10));
    let response = client(&server, retry)
        .execute_with_retry(&SearchRequest::for_objective("x"))
        .await
        .unwrap();

    assert_eq!(response.search_id, "after_retry");
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, RetryPolicy::default())
        .execute_with_retry(&SearchRequest::for_objective("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = ApiClient::new(
        Arc::new(ReqwestTransport::new().unwrap()),
        Arc::new(StaticCredentialSource::new(None, Some(KEY))),
        ClientSettings::default()
            .with_base_url("http://127.0.0.1:1")
            .with_retry(RetryPolicy::no_retry()),
    );

    let err = client
        .execute_with_retry(&SearchRequest::for_objective("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn test_batch_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "objective": "bad" })))
        .respond_with(ResponseTemplate::new(422).set_body_string("objective rejected"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "search_id": "ok",
            "results": []
        })))
        .mount(&server)
        .await;

    let requests = vec![
        SearchRequest::for_objective("good"),
        SearchRequest::for_objective("bad"),
        SearchRequest::for_objective("also good"),
    ];
    let outcomes = client(&server, RetryPolicy::default())
        .dispatch_all(&requests, 2)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert_eq!(
        outcomes[1].result.as_ref().unwrap_err().to_string(),
        "Validation error: objective rejected"
    );
    assert!(outcomes[2].is_success());
}
