//! Per-session conversation state
//!
//! Sessions hold the registered briefing schedules and the pending
//! dialogue step, keyed by an opaque session id. The engine drives the
//! dialogue; the store owns the state.

pub mod engine;
pub mod store;
pub mod types;

pub use engine::ConversationEngine;
pub use store::SessionStore;
pub use types::{PendingStep, PendingTask, Schedule, Session};
