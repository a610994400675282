//! Scheduler loop
//!
//! A single background loop that polls the job registry for due work.
//! Every due job is dispatched to a spawned task, so one slow briefing
//! never delays detection of the next due job.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};

use super::registry::JobRegistry;
use crate::config::SchedulerConfig;
use crate::session::SessionStore;

/// The scheduler loop
pub struct SchedulerRunner {
    config: SchedulerConfig,
    registry: Arc<JobRegistry>,
    sessions: Arc<SessionStore>,
}

impl SchedulerRunner {
    /// Create a new runner
    pub fn new(config: SchedulerConfig, registry: Arc<JobRegistry>, sessions: Arc<SessionStore>) -> Self {
        Self {
            config,
            registry,
            sessions,
        }
    }

    /// One poll: dispatch due jobs and sweep idle sessions
    async fn tick(&self) -> usize {
        let now = Local::now();
        let dispatched = Arc::clone(&self.registry).run_due(now).await;

        let evicted = self.sessions.evict_idle(now).await;
        if evicted > 0 {
            info!(evicted, "SchedulerRunner::tick: evicted idle sessions");
        }

        dispatched
    }

    /// Run the scheduler loop
    ///
    /// This is the process's background heartbeat; it never returns.
    pub async fn run(self) {
        info!(interval_secs = self.config.poll_interval_secs, "SchedulerRunner started");

        loop {
            let dispatched = self.tick().await;
            if dispatched > 0 {
                debug!(dispatched, "SchedulerRunner::run: tick dispatched jobs");
            }

            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// Run a single tick (useful for testing)
    pub async fn tick_once(&self) -> usize {
        self.tick().await
    }
}
