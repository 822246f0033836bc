use std::sync::Arc;

use super::*;
use crate::llm::types::Role;
use crate::state::test_helpers::{MockProvider, TEST_TOKEN, spawn_app, test_app_state};
use crate::types::{Amount, Resolution};

async fn client_for(provider: Arc<MockProvider>, token: Option<&str>) -> ApiClient {
    let base = spawn_app(test_app_state(Some(provider))).await;
    ApiClient::new(&base, token.map(str::to_owned)).unwrap()
}

#[tokio::test]
async fn chat_returns_completion() {
    let provider = Arc::new(MockProvider::replying("4"));
    let client = client_for(provider.clone(), Some(TEST_TOKEN)).await;

    let completion = client
        .chat(ChatFeature::Conversation, &[Message::user("2+2?")])
        .await
        .unwrap();

    let reply = completion.into_reply().unwrap();
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn code_feature_hits_code_endpoint() {
    let provider = Arc::new(MockProvider::replying("fn main() {}"));
    let client = client_for(provider.clone(), Some(TEST_TOKEN)).await;

    client.chat(ChatFeature::Code, &[Message::user("hello world in rust")]).await.unwrap();

    let seen = provider.seen_messages.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].role, Role::System);
}

#[tokio::test]
async fn missing_token_maps_to_status_error() {
    let provider = Arc::new(MockProvider::replying("4"));
    let client = client_for(provider.clone(), None).await;

    let err = client
        .chat(ChatFeature::Conversation, &[Message::user("2+2?")])
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("expected Status, got {other:?}"),
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn generate_images_returns_list() {
    let provider = Arc::new(MockProvider::with_images(&["https://img/1.png", "https://img/2.png"]));
    let client = client_for(provider.clone(), Some(TEST_TOKEN)).await;

    let request = ImageGenerationRequest {
        prompt: "a red cube".into(),
        amount: Amount::Two,
        resolution: Resolution::Medium,
    };
    let images = client.generate_images(&request).await.unwrap();

    let urls: Vec<_> = images.iter().filter_map(|i| i.url.as_deref()).collect();
    assert_eq!(urls, ["https://img/1.png", "https://img/2.png"]);
    let seen = provider.seen_images.lock().unwrap();
    assert_eq!(seen[0].n, 2);
    assert_eq!(seen[0].size, Resolution::Medium);
}

#[tokio::test]
async fn provider_failure_maps_to_500() {
    let provider = Arc::new(MockProvider::failing());
    let client = client_for(provider, Some(TEST_TOKEN)).await;

    let err = client
        .chat(ChatFeature::Conversation, &[Message::user("hi")])
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let provider = Arc::new(MockProvider::replying("ok"));
    let base = spawn_app(test_app_state(Some(provider))).await;
    let client = ApiClient::new(&format!("{base}/"), Some(TEST_TOKEN.into())).unwrap();

    assert!(client.chat(ChatFeature::Conversation, &[Message::user("hi")]).await.is_ok());
}
