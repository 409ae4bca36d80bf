mod common;

use axum::http::StatusCode;
use common::{StubLlm, StubLogs, get_json, test_app};

#[tokio::test]
async fn test_health() {
    let app = test_app(
        StubLogs::with_entries(&[]),
        StubLlm::replying(""),
        StubLlm::replying(""),
    );

    let response = tower::ServiceExt::oneshot(
        app,
        axum::http::Request::builder()
            .uri("/health")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_logs_returns_summary() {
    let logs = StubLogs::with_entries(&["ERROR a", "INFO b"]);
    let summary_llm = StubLlm::replying("Two lines, one error.");
    let rca_llm = StubLlm::replying("unused");
    let app = test_app(logs.clone(), summary_llm.clone(), rca_llm.clone());

    let (status, body) = get_json(app, "/analyze_logs?service=payment-service").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"summary": "Two lines, one error."}));
    assert_eq!(logs.fetch_count(), 1);
    // summary fetch leaves the range to the store
    assert_eq!(*logs.bounded.lock().unwrap(), vec![false]);
    assert_eq!(summary_llm.calls(), 1);
    assert_eq!(rca_llm.calls(), 0);
}

#[tokio::test]
async fn test_analyze_logs_model_failure_is_bad_gateway() {
    let app = test_app(
        StubLogs::with_entries(&["ERROR a"]),
        StubLlm::failing(),
        StubLlm::replying("unused"),
    );

    let (status, body) = get_json(app, "/analyze_logs?service=payment-service").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 502);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Language model call failed")
    );
}

#[tokio::test]
async fn test_analyze_logs_requires_service() {
    let app = test_app(
        StubLogs::with_entries(&[]),
        StubLlm::replying(""),
        StubLlm::replying(""),
    );

    let (status, _) = get_json(app, "/analyze_logs").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_rca_end_to_end() {
    let logs = StubLogs::with_entries(&[
        "ERROR db pool exhausted",
        "WARN retrying order 42",
        "ERROR connection to postgres timed out",
    ]);
    let rca_llm = StubLlm::replying("Database connection timeout");
    let app = test_app(logs.clone(), StubLlm::replying("unused"), rca_llm.clone());

    let (status, body) = get_json(
        app,
        "/chat_rca?question=Why%20did%20the%20checkout-service%20fail%20yesterday%3F",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "checkout-service");
    assert_eq!(body["analysis"], "Database connection timeout");

    let start = chrono::DateTime::parse_from_rfc3339(body["time_range"]["start"].as_str().unwrap()).unwrap();
    let end = chrono::DateTime::parse_from_rfc3339(body["time_range"]["end"].as_str().unwrap()).unwrap();
    assert_eq!(end - start, chrono::Duration::hours(24));

    assert_eq!(*logs.bounded.lock().unwrap(), vec![true]);
    assert_eq!(rca_llm.calls(), 1);
}

#[tokio::test]
async fn test_chat_rca_unknown_service() {
    let logs = StubLogs::with_entries(&["ERROR a"]);
    let app = test_app(logs.clone(), StubLlm::replying(""), StubLlm::replying(""));

    let (status, body) = get_json(app, "/chat_rca?question=why%20is%20everything%20down").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Could not determine which service to analyze. Please specify the service in your question."
    );
    assert_eq!(logs.fetch_count(), 0);
}

#[tokio::test]
async fn test_chat_rca_no_logs() {
    let logs = StubLogs::with_entries(&[]);
    let rca_llm = StubLlm::replying("unused");
    let app = test_app(logs.clone(), StubLlm::replying(""), rca_llm.clone());

    let (status, body) = get_json(app, "/chat_rca?question=inventory-service%20errors").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "No logs found for inventory-service in the specified time range."
    );
    assert_eq!(body["code"], 404);
    assert_eq!(logs.fetch_count(), 1);
    assert_eq!(rca_llm.calls(), 0);
}

#[tokio::test]
async fn test_chat_rca_model_failure() {
    let app = test_app(
        StubLogs::with_entries(&["ERROR a"]),
        StubLlm::replying(""),
        StubLlm::failing(),
    );

    let (status, body) = get_json(app, "/chat_rca?question=payment-service%20down").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("model 'llama2' not found"));
}
