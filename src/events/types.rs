//! Briefing event types

use serde::{Deserialize, Serialize};

use crate::scheduler::JobKind;

/// A briefing produced outside a conversation turn
///
/// Carried on the event bus so the delivery side (console, queue, push
/// channel) can route it back to the owning session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefingEvent {
    pub session_id: String,
    pub subject: String,
    pub kind: JobKind,
    pub text: String,
}

impl BriefingEvent {
    pub fn new(
        session_id: impl Into<String>,
        subject: impl Into<String>,
        kind: JobKind,
        text: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            subject: subject.into(),
            kind,
            text: text.into(),
        }
    }
}
