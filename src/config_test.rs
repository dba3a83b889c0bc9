use super::*;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clean_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_server_env() };
    guard
}

/// # Safety
/// Callers hold `ENV_LOCK`.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("STATIC_DIR");
        std::env::remove_var("MAX_UPLOAD_BYTES");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = clean_env();

    let cfg = ServerConfig::from_env();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    assert!(cfg.static_dir.ends_with("web"));
}

#[test]
fn from_env_overrides() {
    let _guard = clean_env();
    unsafe {
        std::env::set_var("PORT", "8080");
        std::env::set_var("STATIC_DIR", "/srv/plantdoc");
        std::env::set_var("MAX_UPLOAD_BYTES", "1024");
    }

    let cfg = ServerConfig::from_env();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.static_dir, PathBuf::from("/srv/plantdoc"));
    assert_eq!(cfg.max_upload_bytes, 1024);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_garbage_falls_back() {
    let _guard = clean_env();
    unsafe {
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("MAX_UPLOAD_BYTES", "-5");
    }

    let cfg = ServerConfig::from_env();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);

    unsafe { clear_server_env() };
}
