//! Event system for newsdaemon
//!
//! Briefing output is delivered out-of-band through a broadcast bus.

pub mod bus;
pub mod types;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus};
pub use types::BriefingEvent;
