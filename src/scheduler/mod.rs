//! Recurring job scheduling for newsdaemon
//!
//! The registry owns the job set; the runner is the polling loop that
//! asks it for due work.

pub mod registry;
pub mod runner;

pub use registry::{JobHandler, JobKind, JobOutcome, JobRegistry, RegisteredSchedule, ScheduledJob};
pub use runner::SchedulerRunner;
