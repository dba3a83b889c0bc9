//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Optional transport timeouts. `None` leaves the reqwest default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// `None` sends requests without `x-api-key`.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeouts: LlmTimeouts,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.into(),
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeouts: LlmTimeouts::default(),
        }
    }
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// All optional:
    /// - `LLM_API_KEY_ENV`: names the env var holding the key (default `ANTHROPIC_API_KEY`)
    /// - `LLM_API_URL`: Messages endpoint
    /// - `LLM_MODEL`: model id
    /// - `LLM_MAX_TOKENS`: output token cap
    /// - `LLM_REQUEST_TIMEOUT_SECS` / `LLM_CONNECT_TIMEOUT_SECS`: unset means no explicit timeout
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] when a numeric variable is set but
    /// not a valid number.
    pub fn from_env() -> Result<Self, LlmError> {
        let key_var = std::env::var("LLM_API_KEY_ENV").unwrap_or_else(|_| DEFAULT_API_KEY_ENV.to_string());
        let api_key = std::env::var(&key_var).ok().filter(|k| !k.trim().is_empty());

        let api_url = std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = env_parse_opt::<u32>("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
        let timeouts = LlmTimeouts {
            request_secs: env_parse_opt("LLM_REQUEST_TIMEOUT_SECS")?,
            connect_secs: env_parse_opt("LLM_CONNECT_TIMEOUT_SECS")?,
        };

        Ok(Self { api_key, api_url, model, max_tokens, timeouts })
    }
}

fn env_parse_opt<T: std::str::FromStr>(key: &str) -> Result<Option<T>, LlmError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| LlmError::ConfigParse(format!("invalid {key}: {raw}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
