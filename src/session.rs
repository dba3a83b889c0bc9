//! Chat session state store.
//!
//! DESIGN
//! ======
//! A `Session` owns one transcript plus the transient UI flags (input text,
//! recording, loading). All mutation goes through the transition methods
//! below. A transition whose precondition does not hold is a silent no-op:
//! this is UI-adjacent state, so bad input never becomes an error.
//!
//! The transcript is append-only. Nothing here removes or reorders entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Assistant entry every new session starts with.
pub const GREETING: &str = "Hello! I'm PlantDoc 🌿. Upload a photo of your plant or use voice to describe the issue, and I'll help diagnose any problems!";

/// Content of the user entry created by an image upload.
pub const IMAGE_PLACEHOLDER: &str = "Image uploaded";

// =============================================================================
// MESSAGE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// `data:` URI of an uploaded image. Only set on upload entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), image: None }
    }

    #[must_use]
    pub fn user_image(image_data_uri: impl Into<String>) -> Self {
        Self { role: Role::User, content: IMAGE_PLACEHOLDER.into(), image: Some(image_data_uri.into()) }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into(), image: None }
    }
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    messages: Vec<Message>,
    input: String,
    recording: bool,
    loading: bool,
}

/// Serializable snapshot of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    pub messages: Vec<Message>,
    pub input: String,
    pub recording: bool,
    pub loading: bool,
}

impl Session {
    /// Start a session: default flags, transcript seeded with [`GREETING`].
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self { id, messages: vec![Message::assistant(GREETING)], input: String::new(), recording: false, loading: false }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Append a user text entry and start loading.
    ///
    /// Returns the accepted (trimmed) utterance, or `None` when the text is
    /// blank or a request is already loading. Rejection changes nothing.
    pub fn append_user_text(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return None;
        }
        let text = text.to_string();
        self.messages.push(Message::user(text.clone()));
        self.input.clear();
        self.loading = true;
        Some(text)
    }

    /// Append a user upload entry and start loading. Not gated on loading.
    pub fn append_user_image(&mut self, image_data_uri: impl Into<String>) {
        self.messages.push(Message::user_image(image_data_uri));
        self.loading = true;
    }

    /// Append the assistant reply for one outstanding request and stop loading.
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
        self.loading = false;
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    /// Flip the recording flag, returning the new value.
    pub fn toggle_recording(&mut self) -> bool {
        self.recording = !self.recording;
        self.recording
    }

    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            messages: self.messages.clone(),
            input: self.input.clone(),
            recording: self.recording,
            loading: self.loading,
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
