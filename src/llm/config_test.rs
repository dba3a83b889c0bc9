use super::*;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize env access and start from a clean slate.
fn clean_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_llm_env() };
    guard
}

/// # Safety
/// Callers hold `ENV_LOCK`.
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_API_KEY_ENV");
        std::env::remove_var("LLM_API_URL");
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_MAX_TOKENS");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("ANTHROPIC_API_KEY");
        std::env::remove_var("PLANTDOC_TEST_KEY");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = clean_env();

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg, LlmConfig::default());
    assert_eq!(cfg.model, "claude-sonnet-4-20250514");
    assert_eq!(cfg.max_tokens, 1000);
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert!(cfg.api_key.is_none());
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: None, connect_secs: None });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_reads_default_key_var() {
    let _guard = clean_env();
    unsafe { std::env::set_var("ANTHROPIC_API_KEY", "sk-ant") };

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("sk-ant"));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_follows_key_indirection() {
    let _guard = clean_env();
    unsafe {
        std::env::set_var("LLM_API_KEY_ENV", "PLANTDOC_TEST_KEY");
        std::env::set_var("PLANTDOC_TEST_KEY", "secret");
        std::env::set_var("ANTHROPIC_API_KEY", "ignored");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("secret"));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_blank_key_is_absent() {
    let _guard = clean_env();
    unsafe { std::env::set_var("ANTHROPIC_API_KEY", "  ") };

    let cfg = LlmConfig::from_env().unwrap();
    assert!(cfg.api_key.is_none());

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _guard = clean_env();
    unsafe {
        std::env::set_var("LLM_API_URL", "http://127.0.0.1:9999/v1/messages");
        std::env::set_var("LLM_MODEL", "claude-test");
        std::env::set_var("LLM_MAX_TOKENS", "256");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_url, "http://127.0.0.1:9999/v1/messages");
    assert_eq!(cfg.model, "claude-test");
    assert_eq!(cfg.max_tokens, 256);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: Some(42), connect_secs: Some(7) });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_invalid_number_errors() {
    let _guard = clean_env();
    unsafe { std::env::set_var("LLM_MAX_TOKENS", "lots") };

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::ConfigParse(_)));
    assert!(err.to_string().contains("LLM_MAX_TOKENS"));

    unsafe { clear_llm_env() };
}
