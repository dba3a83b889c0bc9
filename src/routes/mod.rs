//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON session API under `/api/sessions`, a health probe, and the static
//! chat page served from the configured directory for every other path.

pub mod sessions;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Session API routes consumed by the chat page.
fn api_routes(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/api/sessions/{id}/input", put(sessions::put_input))
        .route("/api/sessions/{id}/recording", post(sessions::post_recording))
        .route("/api/sessions/{id}/messages", post(sessions::post_message))
        .route("/api/sessions/{id}/images", post(sessions::post_image))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

/// Full application: API routes plus the static chat page.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let page = ServeDir::new(&config.static_dir).append_index_html_on_directories(true);

    api_routes(state, config.max_upload_bytes)
        .fallback_service(page)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
