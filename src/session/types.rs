//! Session state types

use chrono::{DateTime, Local, NaiveTime};

/// A registered briefing schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub subject: String,
    pub daily_time: NaiveTime,
}

/// Step of an in-progress multi-turn exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingStep {
    AwaitingCompanyName,
    AwaitingScheduleTime,
    AwaitingCancellationChoice,
    AwaitingCancellationConfirmation,
    AwaitingReportTestChoice,
}

/// One in-progress multi-turn operation
///
/// A session has at most one of these at a time; it is created when a
/// dialogue starts and cleared when the dialogue resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTask {
    pub step: PendingStep,
    /// Subject the dialogue has settled on so far, if any
    pub subject: Option<String>,
}

impl PendingTask {
    pub fn awaiting_company_name() -> Self {
        Self {
            step: PendingStep::AwaitingCompanyName,
            subject: None,
        }
    }

    pub fn awaiting_schedule_time(subject: impl Into<String>) -> Self {
        Self {
            step: PendingStep::AwaitingScheduleTime,
            subject: Some(subject.into()),
        }
    }

    pub fn awaiting_cancellation_choice() -> Self {
        Self {
            step: PendingStep::AwaitingCancellationChoice,
            subject: None,
        }
    }

    pub fn awaiting_cancellation_confirmation(subject: impl Into<String>) -> Self {
        Self {
            step: PendingStep::AwaitingCancellationConfirmation,
            subject: Some(subject.into()),
        }
    }

    pub fn awaiting_report_test_choice() -> Self {
        Self {
            step: PendingStep::AwaitingReportTestChoice,
            subject: None,
        }
    }
}

/// Per-session conversation state
#[derive(Debug, Clone)]
pub struct Session {
    pub schedules: Vec<Schedule>,
    pub pending: Option<PendingTask>,
    pub last_activity: DateTime<Local>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            schedules: Vec::new(),
            pending: None,
            last_activity: Local::now(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
