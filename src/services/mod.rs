//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `diagnosis` talks to the model and owns prompts and fallbacks; `chat`
//! owns the session transitions around each diagnosis call. Route handlers
//! stay focused on protocol translation.

pub mod chat;
pub mod diagnosis;
