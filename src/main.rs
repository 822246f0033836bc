use std::sync::Arc;

use genius::llm::{AiProvider, LlmClient};
use genius::{routes, services, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Non-fatal: proxy routes answer 500 until a key is configured.
    let provider: Option<Arc<dyn AiProvider>> = match LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(
                chat_model = client.chat_model(),
                image_model = client.image_model(),
                "LLM client initialized"
            );
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; AI features disabled");
            None
        }
    };

    let identity = services::identity::from_env().expect("identity provider init failed");

    let app = routes::app(state::AppState::new(provider, identity));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "genius listening");
    axum::serve(listener, app).await.expect("server failed");
}
