use claude_client::{ClaudeClient, ClientError, ClientSettings, CompletionOptions};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn success_body(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "model": "claude-sonnet-4-20250514",
        "stop_reason": "end_turn",
        "stop_sequence": null,
        "usage": {"input_tokens": 21, "output_tokens": 7}
    })
}

fn error_body(kind: &str, message: &str) -> serde_json::Value {
    json!({"type": "error", "error": {"type": kind, "message": message}})
}

fn client(server: &MockServer) -> ClaudeClient {
    let settings = ClientSettings::default()
        .with_base_url(server.uri())
        .with_retry(3, 0.0);
    ClaudeClient::from_settings("test-key", settings).unwrap()
}

#[tokio::test]
async fn test_messages_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-sonnet-4-20250514",
            "max_tokens": 128,
            "system": "Be terse.",
            "messages": [{"role": "user", "content": "ctx\n\nhello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Hi!")))
        .expect(1)
        .mount(&server)
        .await;

    let options = CompletionOptions::new()
        .with_system("Be terse.")
        .with_context("ctx")
        .with_max_tokens(128);
    let response = client(&server).complete("hello", options).await.unwrap();

    assert_eq!(response.content, "Hi!");
    assert_eq!(response.usage.input_tokens, 21);
    assert_eq!(response.usage.output_tokens, 7);
    assert_eq!(response.model, "claude-sonnet-4-20250514");
    assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
}

#[tokio::test]
async fn test_system_omitted_when_unset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .mount(&server)
        .await;

    client(&server)
        .complete("hello", CompletionOptions::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("system").is_none());
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_bad_request_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(error_body("invalid_request_error", "max_tokens: too large")),
        )
        .expect(1)
        .mount(&server)
        .await;

    match client(&server).complete("hello", CompletionOptions::new()).await {
        Err(ClientError::Validation(msg)) => {
            assert_eq!(msg, "Bad request: max_tokens: too large")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_body("authentication_error", "invalid x-api-key")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).complete("hello", CompletionOptions::new()).await;
    assert!(matches!(result, Err(ClientError::Authentication(_))));
}

#[tokio::test]
async fn test_overloaded_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(error_body("overloaded_error", "Overloaded")),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("third time")))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .complete("hello", CompletionOptions::new())
        .await
        .unwrap();
    assert_eq!(response.content, "third time");
}

#[tokio::test]
async fn test_rate_limited_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(error_body("rate_limit_error", "slow down")),
        )
        .expect(3)
        .mount(&server)
        .await;

    let result = client(&server).complete("hello", CompletionOptions::new()).await;
    assert!(matches!(result, Err(ClientError::RateLimit(_))));
}

#[tokio::test]
async fn test_undecodable_body_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).complete("hello", CompletionOptions::new()).await;
    assert!(matches!(result, Err(ClientError::Upstream(_))));
}
