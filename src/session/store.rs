//! Session store
//!
//! Holds all live conversation sessions behind one mutex. Read
//! operations never create a session; only a dialogue that actually
//! establishes state does, so a stray message from an unknown session
//! id leaves no trace. Sessions without schedules are evicted after an
//! idle timeout; sessions with schedules are kept alive indefinitely.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime};
use tokio::sync::Mutex;
use tracing::debug;

use super::types::{PendingTask, Schedule, Session};

/// The session store
pub struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create a store that evicts schedule-less sessions after `idle_timeout`
    pub fn new(idle_timeout: Duration) -> Self {
        debug!(?idle_timeout, "SessionStore::new: called");
        Self {
            inner: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Set the session's pending task, creating the session if needed
    pub async fn set_pending(&self, session_id: &str, task: PendingTask) {
        debug!(%session_id, step = ?task.step, "SessionStore::set_pending: called");
        let mut inner = self.inner.lock().await;
        let session = inner.entry(session_id.to_string()).or_default();
        session.pending = Some(task);
        session.last_activity = Local::now();
    }

    /// Clear the session's pending task, if the session exists
    pub async fn clear_pending(&self, session_id: &str) {
        debug!(%session_id, "SessionStore::clear_pending: called");
        let mut inner = self.inner.lock().await;
        if let Some(session) = inner.get_mut(session_id) {
            session.pending = None;
            session.last_activity = Local::now();
        }
    }

    /// Get the session's pending task without creating the session
    ///
    /// Refreshes the idle clock for an existing session.
    pub async fn get_pending(&self, session_id: &str) -> Option<PendingTask> {
        let mut inner = self.inner.lock().await;
        let session = inner.get_mut(session_id)?;
        session.last_activity = Local::now();
        session.pending.clone()
    }

    /// Get the session's schedules without creating the session
    pub async fn schedules(&self, session_id: &str) -> Vec<Schedule> {
        let inner = self.inner.lock().await;
        inner.get(session_id).map(|s| s.schedules.clone()).unwrap_or_default()
    }

    /// Add a schedule, replacing any existing one for the same subject
    pub async fn upsert_schedule(&self, session_id: &str, subject: &str, daily_time: NaiveTime) {
        debug!(%session_id, %subject, %daily_time, "SessionStore::upsert_schedule: called");
        let mut inner = self.inner.lock().await;
        let session = inner.entry(session_id.to_string()).or_default();
        session.last_activity = Local::now();

        if let Some(existing) = session.schedules.iter_mut().find(|s| s.subject == subject) {
            existing.daily_time = daily_time;
        } else {
            session.schedules.push(Schedule {
                subject: subject.to_string(),
                daily_time,
            });
        }
    }

    /// Remove the schedule for a subject
    ///
    /// Returns whether a schedule was actually removed.
    pub async fn remove_schedule(&self, session_id: &str, subject: &str) -> bool {
        debug!(%session_id, %subject, "SessionStore::remove_schedule: called");
        let mut inner = self.inner.lock().await;
        let Some(session) = inner.get_mut(session_id) else {
            return false;
        };
        session.last_activity = Local::now();

        let before = session.schedules.len();
        session.schedules.retain(|s| s.subject != subject);
        before != session.schedules.len()
    }

    /// Check whether the session still has a schedule for a subject
    pub async fn has_schedule(&self, session_id: &str, subject: &str) -> bool {
        let inner = self.inner.lock().await;
        inner
            .get(session_id)
            .map(|s| s.schedules.iter().any(|sch| sch.subject == subject))
            .unwrap_or(false)
    }

    /// Drop schedule-less sessions idle past the timeout
    ///
    /// Returns the number of sessions evicted.
    pub async fn evict_idle(&self, now: DateTime<Local>) -> usize {
        let mut inner = self.inner.lock().await;
        let before = inner.len();

        inner.retain(|session_id, session| {
            if !session.schedules.is_empty() {
                return true;
            }
            let idle = (now - session.last_activity)
                .to_std()
                .map(|d| d >= self.idle_timeout)
                .unwrap_or(false);
            if idle {
                debug!(%session_id, "SessionStore::evict_idle: evicting idle session");
            }
            !idle
        });

        before - inner.len()
    }

    /// Check whether a session exists
    pub async fn has_session(&self, session_id: &str) -> bool {
        let inner = self.inner.lock().await;
        inner.contains_key(session_id)
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.len()
    }
}
