//! Diagnosis client — one user action in, one assistant reply out.
//!
//! DESIGN
//! ======
//! Stateless: every call builds a single-turn request from the action alone.
//! No transcript history reaches the model. Any failure (transport, status,
//! malformed body) is logged and replaced by a constant fallback sentence so
//! the transcript never shows transport details.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::LlmChat;
use crate::llm::types::{ChatResponse, Content, ContentBlock, ImageSource, LlmError, Message};

pub const IMAGE_PROMPT: &str = "You are PlantDoc, a plant disease diagnosis expert. Analyze this plant image and provide: 1) Plant identification if possible, 2) Any visible diseases or issues, 3) Recommended treatment. Be concise and helpful.";

pub const IMAGE_FALLBACK: &str = "Sorry, I had trouble analyzing that image. Please try again.";
pub const TEXT_FALLBACK: &str = "Sorry, I encountered an error. Please try again.";

// =============================================================================
// IMAGE ENCODING
// =============================================================================

/// An uploaded image, base64-encoded once and shared by request and transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    media_type: String,
    data: String,
}

impl EncodedImage {
    /// Encode raw bytes. The media type is passed through unmodified.
    #[must_use]
    pub fn encode(bytes: &[u8], media_type: impl Into<String>) -> Self {
        Self { media_type: media_type.into(), data: BASE64_STANDARD.encode(bytes) }
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// `data:<media_type>;base64,<data>`, as shown in the transcript.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

// =============================================================================
// REQUEST CONSTRUCTION
// =============================================================================

/// Image block first, then the fixed instruction.
#[must_use]
pub fn image_request(image: &EncodedImage) -> Message {
    Message::user(Content::Blocks(vec![
        ContentBlock::Image { source: ImageSource::base64(image.media_type(), image.data()) },
        ContentBlock::Text { text: IMAGE_PROMPT.into() },
    ]))
}

#[must_use]
pub fn text_prompt(utterance: &str) -> String {
    format!(
        "You are PlantDoc, a friendly plant disease diagnosis expert. The user says: \"{utterance}\". Provide helpful advice about plant care, diseases, or issues. Be concise and practical."
    )
}

#[must_use]
pub fn text_request(utterance: &str) -> Message {
    Message::user(Content::Text(text_prompt(utterance)))
}

// =============================================================================
// DIAGNOSIS
// =============================================================================

/// Diagnose an uploaded image. Never fails: errors become [`IMAGE_FALLBACK`].
pub async fn diagnose_image(llm: &dyn LlmChat, image: &EncodedImage) -> String {
    info!(media_type = image.media_type(), data_len = image.data().len(), "diagnosis: image request");
    let reply = llm.chat(&[image_request(image)]).await;
    reply_or_fallback(reply, IMAGE_FALLBACK, "image")
}

/// Diagnose a typed or dictated utterance. Errors become [`TEXT_FALLBACK`].
pub async fn diagnose_text(llm: &dyn LlmChat, utterance: &str) -> String {
    info!(utterance_len = utterance.len(), "diagnosis: text request");
    let reply = llm.chat(&[text_request(utterance)]).await;
    reply_or_fallback(reply, TEXT_FALLBACK, "text")
}

fn reply_or_fallback(reply: Result<ChatResponse, LlmError>, fallback: &str, kind: &'static str) -> String {
    match reply {
        Ok(resp) => {
            let text = resp.text();
            info!(
                kind,
                model = %resp.model,
                stop_reason = %resp.stop_reason,
                input_tokens = resp.input_tokens,
                output_tokens = resp.output_tokens,
                reply_len = text.len(),
                "diagnosis: reply received"
            );
            text
        }
        Err(e) => {
            warn!(kind, code = e.error_code(), retryable = e.retryable(), error = %e, "diagnosis: request failed");
            fallback.to_string()
        }
    }
}

#[cfg(test)]
#[path = "diagnosis_test.rs"]
mod tests;
