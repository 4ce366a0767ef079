use analyst_core::config::CompletionConfig;
use analyst_core::error::{ErrorKind, Result};
use analyst_core::prompt::PromptBuilder;
use analyst_llm::{AnalysisResult, CompletionClient, Credential};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the blocking client against `base_url` off the async runtime.
async fn send_to(base_url: String, artifact_text: &str) -> Result<AnalysisResult> {
    let prompt = PromptBuilder::default().build(artifact_text).unwrap();
    let config = CompletionConfig {
        base_url,
        ..CompletionConfig::default()
    };
    tokio::task::spawn_blocking(move || {
        let client = CompletionClient::new(Credential::new("sk-test").unwrap(), &config)?;
        client.send(&prompt)
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_success_returns_output_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-5.2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_123",
            "output": [{
                "type": "message",
                "role": "assistant",
                "content": [{"type": "output_text", "text": "FINDINGS: none"}]
            }],
            "usage": {"input_tokens": 412, "output_tokens": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = send_to(server.uri(), "sshd: Accepted publickey").await.unwrap();
    assert_eq!(result.text(), "FINDINGS: none");
    assert_eq!(result.input_tokens, Some(412));
    assert_eq!(result.output_tokens, Some(5));
}

#[tokio::test]
async fn test_request_carries_prompt_as_input() {
    let server = MockServer::start().await;
    let expected = PromptBuilder::default().build("nmap -sS 10.0.0.0/24").unwrap();
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"input": expected.as_str()})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output_text": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = send_to(server.uri(), "nmap -sS 10.0.0.0/24").await.unwrap();
    assert_eq!(result.text(), "ok");
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = send_to(server.uri(), "x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(!err.to_string().contains("sk-test"));
}

#[tokio::test]
async fn test_too_many_requests_is_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached", "type": "requests"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = send_to(server.uri(), "x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimit);
}

#[tokio::test]
async fn test_server_error_is_transport_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "The server had an error processing your request"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = send_to(server.uri(), "x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("500: The server had an error"));
}

#[tokio::test]
async fn test_malformed_body_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = send_to(server.uri(), "x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_whitespace_body_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": [{
                "type": "message",
                "content": [{"type": "output_text", "text": "  \n "}]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = send_to(server.uri(), "x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyResponse);
}

#[tokio::test]
async fn test_missing_output_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "resp_9", "output": []})))
        .mount(&server)
        .await;

    let err = send_to(server.uri(), "x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyResponse);
}

#[tokio::test]
async fn test_unreachable_host_is_transport() {
    let err = send_to("http://127.0.0.1:1".to_string(), "x")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
