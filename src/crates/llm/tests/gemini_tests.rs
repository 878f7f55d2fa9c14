//! HTTP-level tests for the Gemini client against a mock server.

use llm::remote::GeminiClient;
use llm::{ChatModel, ChatRequest, LlmError, Message, RemoteLlmConfig, ToolDefinition};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash-lite";
const GENERATE_PATH: &str = "/models/gemini-2.5-flash-lite:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(RemoteLlmConfig::new("test-key", server.uri(), MODEL)).unwrap()
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 40, "candidatesTokenCount": 8, "totalTokenCount": 48}
    })
}

#[tokio::test]
async fn test_generate_content_text_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "systemInstruction": {"parts": [{"text": "You are an F1 assistant"}]},
            "contents": [{"role": "user", "parts": [{"text": "Hello"}]}],
            "generationConfig": {"maxOutputTokens": 2048}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Hi! Ask me about F1.")))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::new(vec![
        Message::system("You are an F1 assistant"),
        Message::human("Hello"),
    ])
    .with_temperature(0.1)
    .with_max_tokens(2048);

    let response = client_for(&server).chat(request).await.unwrap();

    assert_eq!(response.text(), "Hi! Ask me about F1.");
    assert!(response.tool_calls().is_empty());
    assert_eq!(response.usage.map(|u| u.input_tokens), Some(40));
}

#[tokio::test]
async fn test_generate_content_function_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "tools": [{"functionDeclarations": [{"name": "get_drivers"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"functionCall": {"name": "get_drivers", "args": {"session_key": "latest"}}}]
                },
                "finishReason": "STOP"
            }]
        })))
        .mount(&server)
        .await;

    let request = ChatRequest::new(vec![Message::human("Who is driving?")]).with_tools(vec![
        ToolDefinition::new("get_drivers", "Get drivers for a session")
            .with_parameters(json!({"type": "object", "properties": {"session_key": {"type": "string"}}})),
    ]);

    let response = client_for(&server).chat(request).await.unwrap();

    let calls = response.tool_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "get_drivers");
    assert_eq!(calls[0].arguments["session_key"], "latest");
}

#[tokio::test]
async fn test_invalid_api_key_maps_to_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat(ChatRequest::new(vec![Message::human("hi")]))
        .await
        .unwrap_err();

    assert!(err.is_auth_error(), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_quota_and_permission_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({"contents": [{"parts": [{"text": "quota"}]}]})))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({"contents": [{"parts": [{"text": "permission"}]}]})))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let quota = client
        .chat(ChatRequest::new(vec![Message::human("quota")]))
        .await
        .unwrap_err();
    assert!(matches!(quota, LlmError::RateLimitExceeded(_)));

    let denied = client
        .chat(ChatRequest::new(vec![Message::human("permission")]))
        .await
        .unwrap_err();
    assert!(matches!(denied, LlmError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat(ChatRequest::new(vec![Message::human("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_is_available() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models/gemini-2.5-flash-lite"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "models/gemini-2.5-flash-lite"})))
        .mount(&server)
        .await;

    assert!(client_for(&server).is_available().await.unwrap());

    let missing = GeminiClient::new(RemoteLlmConfig::new("test-key", server.uri(), "no-such-model")).unwrap();
    assert!(!missing.is_available().await.unwrap());
}
