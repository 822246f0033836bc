use super::*;
use serde_json::json;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_missing_api_key() {
    let err = LlmError::MissingApiKey { var: "OPENAI_API_KEY".into() };
    assert_eq!(err.error_code(), "E_MISSING_API_KEY");
    assert_eq!(err.to_string(), "missing API key: env var OPENAI_API_KEY not set");
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 429, body: "slow down".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
    assert_eq!(err.to_string(), "API response error: status 429");
}

#[test]
fn error_code_api_parse() {
    assert_eq!(LlmError::ApiParse("eof".into()).error_code(), "E_API_PARSE");
}

// =============================================================================
// ContentPart classification
// =============================================================================

#[test]
fn content_part_text() {
    let part: ContentPart = serde_json::from_value(json!({ "type": "text", "text": "hi" })).unwrap();
    assert_eq!(part, ContentPart::Text { text: "hi".into() });
}

#[test]
fn content_part_refusal() {
    let part: ContentPart = serde_json::from_value(json!({ "type": "refusal", "refusal": "no" })).unwrap();
    assert_eq!(part, ContentPart::Refusal { refusal: "no".into() });
}

#[test]
fn content_part_image_is_unknown_and_preserved() {
    let raw = json!({ "type": "image_url", "image_url": { "url": "https://x.test/a.png" } });
    let part: ContentPart = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(part, ContentPart::Unknown(raw.clone()));
    assert_eq!(serde_json::to_value(&part).unwrap(), raw);
}

#[test]
fn content_part_text_without_string_is_unknown() {
    let part: ContentPart = serde_json::from_value(json!({ "type": "text", "text": 5 })).unwrap();
    assert!(matches!(part, ContentPart::Unknown(_)));
}

// =============================================================================
// Message
// =============================================================================

#[test]
fn message_plain_string_content() {
    let msg: Message = serde_json::from_value(json!({ "role": "user", "content": "2+2?" })).unwrap();
    assert_eq!(msg, Message::user("2+2?"));
}

#[test]
fn message_part_list_content() {
    let msg: Message = serde_json::from_value(json!({
        "role": "assistant",
        "content": [{ "type": "text", "text": "a" }, { "type": "refusal", "refusal": "b" }]
    }))
    .unwrap();
    assert_eq!(msg.role, Role::Assistant);
    let Some(Content::Parts(parts)) = msg.content else {
        panic!("expected parts");
    };
    assert_eq!(parts.len(), 2);
}

#[test]
fn message_null_content() {
    let msg: Message = serde_json::from_value(json!({ "role": "assistant", "content": null })).unwrap();
    assert!(msg.content.is_none());
    let msg: Message = serde_json::from_value(json!({ "role": "assistant" })).unwrap();
    assert!(msg.content.is_none());
}

#[test]
fn message_unknown_role_is_rejected() {
    let res = serde_json::from_value::<Message>(json!({ "role": "wizard", "content": "x" }));
    assert!(res.is_err());
}

#[test]
fn message_serializes_wire_shape() {
    let value = serde_json::to_value(Message::system("be brief")).unwrap();
    assert_eq!(value, json!({ "role": "system", "content": "be brief" }));
}

// =============================================================================
// ChatCompletion
// =============================================================================

fn completion_json() -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "4" },
            "finish_reason": "stop",
            "logprobs": null
        }],
        "usage": {
            "prompt_tokens": 9,
            "completion_tokens": 1,
            "total_tokens": 10,
            "prompt_tokens_details": { "cached_tokens": 0 }
        }
    })
}

#[test]
fn completion_reply_is_first_choice() {
    let completion: ChatCompletion = serde_json::from_value(completion_json()).unwrap();
    assert_eq!(completion.reply(), Some(&Message::assistant(Some("4".into()))));
    assert_eq!(completion.usage.as_ref().unwrap().total_tokens, 10);
}

#[test]
fn completion_keeps_unread_fields() {
    let completion: ChatCompletion = serde_json::from_value(completion_json()).unwrap();
    let value = serde_json::to_value(&completion).unwrap();
    assert_eq!(value["object"], "chat.completion");
    assert_eq!(value["created"], 1_700_000_000);
    assert!(value["choices"][0].get("logprobs").is_some());
    assert_eq!(value["usage"]["prompt_tokens_details"], json!({ "cached_tokens": 0 }));
    assert_eq!(value["usage"]["total_tokens"], 10);
}

#[test]
fn completion_without_choices_has_no_reply() {
    let completion: ChatCompletion = serde_json::from_value(json!({ "choices": [] })).unwrap();
    assert!(completion.into_reply().is_none());
}

// =============================================================================
// ImageData
// =============================================================================

#[test]
fn image_data_without_url() {
    let img: ImageData = serde_json::from_value(json!({ "b64_json": "AAAA" })).unwrap();
    assert!(img.url.is_none());
    assert_eq!(serde_json::to_value(&img).unwrap(), json!({ "b64_json": "AAAA" }));
}
