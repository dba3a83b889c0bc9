//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the live chat sessions and the diagnosis model. Sessions are
//! process-local and vanish on restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::llm::LlmChat;
use crate::session::Session;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    pub llm: Arc<dyn LlmChat>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
