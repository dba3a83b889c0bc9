mod config;
mod error;
mod llm;
mod routes;
mod services;
mod session;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();

    let llm = llm::LlmClient::from_env().expect("LLM client config invalid");
    if llm.is_authenticated() {
        tracing::info!(model = llm.model(), "LLM client initialized");
    } else {
        tracing::warn!(model = llm.model(), "no API key configured — requests are sent unauthenticated");
    }

    let state = state::AppState::new(Arc::new(llm));

    let app = routes::app(state, &config);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, static_dir = %config.static_dir.display(), "plantdoc listening");
    axum::serve(listener, app).await.expect("server failed");
}
