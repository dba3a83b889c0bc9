use super::*;
use serde_json::json;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_config_parse() {
    let err = LlmError::ConfigParse("bad".into());
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn error_code_api_request() {
    let err = LlmError::ApiRequest("timeout".into());
    assert_eq!(err.error_code(), "E_API_REQUEST");
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
}

#[test]
fn error_code_api_parse() {
    let err = LlmError::ApiParse("json".into());
    assert_eq!(err.error_code(), "E_API_PARSE");
}

#[test]
fn error_code_http_client_build() {
    let err = LlmError::HttpClientBuild("tls".into());
    assert_eq!(err.error_code(), "E_HTTP_CLIENT_BUILD");
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_transport_and_server_errors() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::ApiResponse { status: 401, body: String::new() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::ConfigParse("bad".into()).retryable());
}

#[test]
fn display_api_response_hides_body() {
    let err = LlmError::ApiResponse { status: 502, body: "secret upstream detail".into() };
    let shown = err.to_string();
    assert!(shown.contains("502"));
    assert!(!shown.contains("secret"));
}

// =============================================================================
// WIRE SHAPES
// =============================================================================

#[test]
fn image_block_serializes_in_messages_api_shape() {
    let block = ContentBlock::Image { source: ImageSource::base64("image/png", "AAAA") };
    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(
        value,
        json!({ "type": "image", "source": { "type": "base64", "media_type": "image/png", "data": "AAAA" } })
    );
}

#[test]
fn text_content_serializes_as_plain_string() {
    let msg = Message::user(Content::Text("hello".into()));
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value, json!({ "role": "user", "content": "hello" }));
}

#[test]
fn unknown_block_type_deserializes_to_unknown() {
    let block: ContentBlock = serde_json::from_value(json!({ "type": "tool_use", "id": "x" })).unwrap();
    assert_eq!(block, ContentBlock::Unknown);
}

// =============================================================================
// ChatResponse::text
// =============================================================================

#[test]
fn text_joins_segments_with_newline() {
    let resp = ChatResponse {
        content: vec![
            ContentBlock::Text { text: "Tomato.".into() },
            ContentBlock::Unknown,
            ContentBlock::Text { text: "Early blight.".into() },
        ],
        ..ChatResponse::default()
    };
    assert_eq!(resp.text(), "Tomato.\nEarly blight.");
}

#[test]
fn text_of_response_without_text_segments_is_empty() {
    let resp = ChatResponse { content: vec![ContentBlock::Unknown], ..ChatResponse::default() };
    assert_eq!(resp.text(), "");
}
