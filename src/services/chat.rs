//! Chat actions — session transitions around one diagnosis call.
//!
//! DESIGN
//! ======
//! Each action is one sequential flow: append the user entry, release the
//! session lock, await the model, re-acquire the lock and append the single
//! assistant entry. The lock is never held across the network call, so
//! overlapping actions interleave and complete in arrival order. There is no
//! queue and no cancellation.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::diagnosis::{self, EncodedImage};
use crate::error::ErrorCode;
use crate::session::{Session, SessionView};
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),
}

impl ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "E_SESSION_NOT_FOUND",
        }
    }
}

/// Result of a send or upload action.
///
/// `accepted == false` means the input was rejected as a no-op: no entry
/// was appended and the loading flag is unchanged. A rejected send still
/// leaves its text in the input field, as typing into the box would.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub accepted: bool,
    pub session: SessionView,
}

// =============================================================================
// SESSION LIFECYCLE
// =============================================================================

/// Start a new session seeded with the greeting.
pub async fn start_session(state: &AppState) -> SessionView {
    let id = Uuid::new_v4();
    let session = Session::new(id);
    let view = session.view();
    state.sessions.write().await.insert(id, session);
    info!(session_id = %id, "chat: session started");
    view
}

/// # Errors
///
/// Returns [`ChatError::SessionNotFound`] for an unknown id.
pub async fn get_session(state: &AppState, id: Uuid) -> Result<SessionView, ChatError> {
    let sessions = state.sessions.read().await;
    sessions
        .get(&id)
        .map(Session::view)
        .ok_or(ChatError::SessionNotFound(id))
}

/// Drop a session. Replies still in flight for it are discarded.
///
/// # Errors
///
/// Returns [`ChatError::SessionNotFound`] for an unknown id.
pub async fn end_session(state: &AppState, id: Uuid) -> Result<(), ChatError> {
    state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or(ChatError::SessionNotFound(id))?;
    info!(session_id = %id, "chat: session ended");
    Ok(())
}

// =============================================================================
// FLAGS
// =============================================================================

/// # Errors
///
/// Returns [`ChatError::SessionNotFound`] for an unknown id.
pub async fn set_input(state: &AppState, id: Uuid, text: String) -> Result<SessionView, ChatError> {
    with_session(state, id, |session| session.set_input(text)).await
}

/// Set the recording flag, or toggle it when `recording` is `None`.
///
/// # Errors
///
/// Returns [`ChatError::SessionNotFound`] for an unknown id.
pub async fn set_recording(state: &AppState, id: Uuid, recording: Option<bool>) -> Result<SessionView, ChatError> {
    with_session(state, id, |session| match recording {
        Some(flag) => session.set_recording(flag),
        None => {
            session.toggle_recording();
        }
    })
    .await
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Send typed or dictated text.
///
/// When `text` is given it replaces the input field first; the stored input
/// is what gets sent. Blank input or a send while loading is a no-op.
///
/// # Errors
///
/// Returns [`ChatError::SessionNotFound`] if the session is unknown, or
/// ended before the reply arrived.
pub async fn send_text(state: &AppState, id: Uuid, text: Option<String>) -> Result<ActionOutcome, ChatError> {
    let (accepted, view) = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(ChatError::SessionNotFound(id))?;
        if let Some(text) = text {
            session.set_input(text);
        }
        let input = session.input().to_string();
        (session.append_user_text(&input), session.view())
    };

    let Some(utterance) = accepted else {
        info!(session_id = %id, loading = view.loading, "chat: text rejected");
        return Ok(ActionOutcome { accepted: false, session: view });
    };

    let reply = diagnosis::diagnose_text(state.llm.as_ref(), &utterance).await;
    let session = complete(state, id, reply).await?;
    Ok(ActionOutcome { accepted: true, session })
}

/// Upload an image.
///
/// An empty body or a media type outside `image/*` is a no-op. The media
/// type is otherwise forwarded unmodified.
///
/// # Errors
///
/// Returns [`ChatError::SessionNotFound`] if the session is unknown, or
/// ended before the reply arrived.
pub async fn upload_image(
    state: &AppState,
    id: Uuid,
    bytes: &[u8],
    media_type: Option<&str>,
) -> Result<ActionOutcome, ChatError> {
    let media_type = media_type.filter(|mt| is_image_media_type(mt));
    let Some(media_type) = media_type.filter(|_| !bytes.is_empty()) else {
        info!(session_id = %id, len = bytes.len(), "chat: upload rejected");
        let session = get_session(state, id).await?;
        return Ok(ActionOutcome { accepted: false, session });
    };

    let image = EncodedImage::encode(bytes, media_type);
    with_session(state, id, |session| session.append_user_image(image.data_uri())).await?;

    let reply = diagnosis::diagnose_image(state.llm.as_ref(), &image).await;
    let session = complete(state, id, reply).await?;
    Ok(ActionOutcome { accepted: true, session })
}

// =============================================================================
// HELPERS
// =============================================================================

/// `image/<subtype>`, with the type compared case-insensitively.
fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .split_once('/')
        .is_some_and(|(kind, subtype)| kind.trim().eq_ignore_ascii_case("image") && !subtype.trim().is_empty())
}

async fn with_session<F>(state: &AppState, id: Uuid, f: F) -> Result<SessionView, ChatError>
where
    F: FnOnce(&mut Session),
{
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ChatError::SessionNotFound(id))?;
    f(session);
    Ok(session.view())
}

/// Append the one assistant entry owed to a finished request.
async fn complete(state: &AppState, id: Uuid, reply: String) -> Result<SessionView, ChatError> {
    let result = with_session(state, id, |session| session.append_assistant(reply)).await;
    if result.is_err() {
        warn!(session_id = %id, "chat: session ended before reply; reply dropped");
    }
    result
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
