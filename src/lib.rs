//! NewsDaemon - conversational news briefing scheduler
//!
//! NewsDaemon turns a chat session into a standing news subscription:
//! name a company, confirm a delivery time, and a daily briefing plus a
//! weekly digest arrive on schedule. All state lives in memory for the
//! lifetime of the process; schedules are scoped to their chat session.
//!
//! # Core Concepts
//!
//! - **One dialogue step at a time**: Each reply is interpreted against
//!   the session's pending step, so plain free text drives setup
//! - **Jobs follow schedules**: Every registered schedule owns a daily
//!   and a weekly job; cancelling the schedule cancels both
//! - **Fire-and-forget dispatch**: The scheduler loop never waits on a
//!   briefing, so a slow fetch delays nothing else
//!
//! # Modules
//!
//! - [`session`] - Conversation state machine and session store
//! - [`scheduler`] - Recurring job registry and polling loop
//! - [`briefing`] - Job handler that produces and delivers briefings
//! - [`summarizer`] - Article summaries and weekly digests
//! - [`news`] - News search and article fetch client
//! - [`llm`] - LLM client trait and OpenAI implementation
//! - [`events`] - Broadcast bus for delivered briefings
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod briefing;
pub mod cli;
pub mod config;
pub mod events;
pub mod llm;
pub mod news;
pub mod repl;
pub mod scheduler;
pub mod session;
pub mod summarizer;

// Re-export commonly used types
pub use briefing::BriefingHandler;
pub use config::{Config, DialogueConfig, LlmConfig, NewsConfig, SchedulerConfig, SessionConfig};
pub use events::{BriefingEvent, EventBus};
pub use llm::{LlmClient, LlmError, OpenAIClient};
pub use news::{Article, HttpNewsStore, NewsError, NewsStore, QueryWindow};
pub use scheduler::{
    JobHandler, JobKind, JobOutcome, JobRegistry, RegisteredSchedule, ScheduledJob, SchedulerRunner,
};
pub use session::{ConversationEngine, PendingStep, PendingTask, Schedule, Session, SessionStore};
pub use summarizer::{LatestSummary, Summarizer};
