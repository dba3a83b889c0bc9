//! LLM — remote diagnosis model adapter.
//!
//! DESIGN
//! ======
//! One provider: the Anthropic Messages API. `LlmClient` is configured from
//! environment variables and exposed to services only through the
//! [`LlmChat`] trait, so tests substitute scripted models.

pub mod anthropic;
pub mod config;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client backed by the Anthropic Messages API.
pub struct LlmClient {
    inner: anthropic::AnthropicClient,
    authenticated: bool,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// See [`LlmConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let authenticated = config.api_key.is_some();
        let inner = anthropic::AnthropicClient::new(config)?;
        Ok(Self { inner, authenticated })
    }

    /// Return the configured model name (e.g. `"claude-sonnet-4-20250514"`).
    #[must_use]
    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Whether requests carry an `x-api-key` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner.chat(messages).await
    }
}
