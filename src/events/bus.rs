//! Event bus - pub/sub channel for out-of-band briefing delivery
//!
//! Scheduled jobs and test reports finish after the conversation turn
//! that caused them has already returned, so their output travels over
//! this bus instead of a return value. Consumers (the chat front-end,
//! loggers) subscribe and render events as they arrive.

use tokio::sync::broadcast;
use tracing::debug;

use super::types::BriefingEvent;

/// Default channel capacity (events)
///
/// Briefings are low-volume; this buffers days of output for a slow consumer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Central bus for briefing delivery
pub struct EventBus {
    tx: broadcast::Sender<BriefingEvent>,
}

impl EventBus {
    /// Create a new event bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "EventBus::new: creating event bus");
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a new event bus with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Emit an event to all subscribers
    ///
    /// Fire-and-forget: with no subscribers the event is dropped, and a
    /// full channel drops its oldest events.
    pub fn emit(&self, event: BriefingEvent) {
        debug!(session_id = %event.session_id, subject = %event.subject, kind = %event.kind, "EventBus::emit");
        // Ignore send errors (no subscribers is OK)
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events
    ///
    /// Only events emitted after subscription are received.
    pub fn subscribe(&self) -> broadcast::Receiver<BriefingEvent> {
        debug!("EventBus::subscribe: new subscriber");
        self.tx.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
