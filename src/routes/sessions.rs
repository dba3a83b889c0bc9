//! Chat session routes.
//!
//! Handlers translate HTTP into `services::chat` calls and back. Send and
//! upload requests stay open until the diagnosis reply has been appended.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::services::chat::{self, ActionOutcome, ChatError};
use crate::session::SessionView;
use crate::state::AppState;

// =============================================================================
// BODIES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct InputBody {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordingBody {
    /// Absent toggles the flag.
    #[serde(default)]
    pub recording: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendBody {
    /// Absent sends the stored input text.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

// =============================================================================
// ERRORS
// =============================================================================

pub(crate) fn chat_error_to_status(err: &ChatError) -> StatusCode {
    match err {
        ChatError::SessionNotFound(_) => StatusCode::NOT_FOUND,
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = chat_error_to_status(&self);
        let body = ErrorBody { code: self.error_code().to_string(), message: self.to_string() };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/sessions` — start a session with the greeting pre-seeded.
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    (StatusCode::CREATED, Json(chat::start_session(&state).await))
}

/// `GET /api/sessions/{id}` — transcript and flags.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ChatError> {
    chat::get_session(&state, id).await.map(Json)
}

/// `DELETE /api/sessions/{id}` — end a session.
pub async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ChatError> {
    chat::end_session(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/sessions/{id}/input` — replace the input text (typing or speech result).
pub async fn put_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<InputBody>,
) -> Result<Json<SessionView>, ChatError> {
    chat::set_input(&state, id, body.text).await.map(Json)
}

/// `POST /api/sessions/{id}/recording` — set or toggle the recording flag.
pub async fn post_recording(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordingBody>,
) -> Result<Json<SessionView>, ChatError> {
    chat::set_recording(&state, id, body.recording).await.map(Json)
}

/// `POST /api/sessions/{id}/messages` — send text and wait for the reply.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendBody>,
) -> Result<Json<ActionOutcome>, ChatError> {
    chat::send_text(&state, id, body.text).await.map(Json)
}

/// `POST /api/sessions/{id}/images` — raw image body, `Content-Type` is the media type.
pub async fn post_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ActionOutcome>, ChatError> {
    let media_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    chat::upload_image(&state, id, &body, media_type).await.map(Json)
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
