//! Recurring job registry
//!
//! Owns every scheduled briefing job. Each (session, subject) pair maps
//! to one daily and one weekly job; re-registration replaces the pair,
//! cancellation removes it. The registry never reads session state -
//! jobs only carry the session id and subject of their owner.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, NaiveTime};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

/// Which briefing a job produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobKind {
    Daily,
    Weekly,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Daily => write!(f, "daily"),
            JobKind::Weekly => write!(f, "weekly"),
        }
    }
}

/// A registered recurring job
#[derive(Debug, Clone)]
pub struct ScheduledJob {
    pub session_id: String,
    pub subject: String,
    pub kind: JobKind,
    pub due_at: DateTime<Local>,
    pub period: Duration,
}

/// What to do with a job after one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Keep the job at its already-advanced due time
    Reschedule,
    /// Remove the job; it should not fire again
    Cancel,
}

/// Executes a due job
///
/// Handlers run in spawned tasks, so a slow or failing handler never
/// delays the scheduler loop or other due jobs from the same tick.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn run(&self, job: &ScheduledJob) -> JobOutcome;
}

/// One subject's daily+weekly pair
#[derive(Debug, Clone, Default)]
struct JobPair {
    daily: Option<ScheduledJob>,
    weekly: Option<ScheduledJob>,
}

impl JobPair {
    fn is_empty(&self) -> bool {
        self.daily.is_none() && self.weekly.is_none()
    }
}

/// A subject with an active daily job, as reported by list_for_session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredSchedule {
    pub subject: String,
    pub daily_time: NaiveTime,
}

/// Internal state protected by mutex
struct RegistryInner {
    /// (session id, subject) -> its job pair
    jobs: HashMap<(String, String), JobPair>,

    /// Key registration order, for stable listing
    order: Vec<(String, String)>,
}

/// The job registry
///
/// A single mutex guards the job collection; conversation turns
/// (schedule/cancel) and the scheduler loop (run_due) both touch it,
/// and every operation is short.
pub struct JobRegistry {
    inner: Mutex<RegistryInner>,
    handler: Arc<dyn JobHandler>,
}

impl JobRegistry {
    /// Create a registry that dispatches due jobs to the given handler
    pub fn new(handler: Arc<dyn JobHandler>) -> Self {
        debug!("JobRegistry::new: called");
        Self {
            inner: Mutex::new(RegistryInner {
                jobs: HashMap::new(),
                order: Vec::new(),
            }),
            handler,
        }
    }

    /// Install the daily+weekly pair for a (session, subject)
    ///
    /// The daily job first fires at the next occurrence of `daily_time`
    /// after `now` and recurs every 24 hours; the weekly job first
    /// fires 7 days from `now` and recurs every 7 days. An existing
    /// pair for the same (session, subject) is replaced, keeping its
    /// original position in the listing order.
    pub async fn schedule(&self, session_id: &str, subject: &str, daily_time: NaiveTime, now: DateTime<Local>) {
        debug!(%session_id, %subject, %daily_time, "JobRegistry::schedule: called");
        let key = (session_id.to_string(), subject.to_string());

        let daily = ScheduledJob {
            session_id: session_id.to_string(),
            subject: subject.to_string(),
            kind: JobKind::Daily,
            due_at: next_daily_occurrence(now, daily_time),
            period: Duration::days(1),
        };

        let weekly = ScheduledJob {
            session_id: session_id.to_string(),
            subject: subject.to_string(),
            kind: JobKind::Weekly,
            due_at: now + Duration::days(7),
            period: Duration::days(7),
        };

        let mut inner = self.inner.lock().await;
        if inner.jobs.contains_key(&key) {
            debug!(%session_id, %subject, "JobRegistry::schedule: replacing existing pair");
        } else {
            inner.order.push(key.clone());
        }
        inner.jobs.insert(
            key,
            JobPair {
                daily: Some(daily),
                weekly: Some(weekly),
            },
        );
    }

    /// List subjects with an active daily job, in registration order
    pub async fn list_for_session(&self, session_id: &str) -> Vec<RegisteredSchedule> {
        debug!(%session_id, "JobRegistry::list_for_session: called");
        let inner = self.inner.lock().await;

        inner
            .order
            .iter()
            .filter(|(sid, _)| sid == session_id)
            .filter_map(|key| {
                let daily = inner.jobs.get(key)?.daily.as_ref()?;
                Some(RegisteredSchedule {
                    subject: key.1.clone(),
                    daily_time: daily.due_at.time(),
                })
            })
            .collect()
    }

    /// Remove the daily+weekly pair for a (session, subject)
    ///
    /// No-op if no such pair exists.
    pub async fn cancel(&self, session_id: &str, subject: &str) {
        debug!(%session_id, %subject, "JobRegistry::cancel: called");
        let key = (session_id.to_string(), subject.to_string());

        let mut inner = self.inner.lock().await;
        if inner.jobs.remove(&key).is_some() {
            inner.order.retain(|k| k != &key);
            debug!(%session_id, %subject, "JobRegistry::cancel: pair removed");
        } else {
            debug!(%session_id, %subject, "JobRegistry::cancel: nothing registered, no-op");
        }
    }

    /// Dispatch every job due at `now` and advance its due time
    ///
    /// Each due job runs in its own spawned task; this method returns
    /// after dispatch without waiting for handlers. Due times are
    /// advanced past `now` before dispatch, so a job fires at most once
    /// per occurrence even if a tick was missed. Returns the number of
    /// jobs dispatched.
    pub async fn run_due(self: Arc<Self>, now: DateTime<Local>) -> usize {
        let mut due_jobs = Vec::new();

        {
            let mut inner = self.inner.lock().await;
            for pair in inner.jobs.values_mut() {
                for slot in [&mut pair.daily, &mut pair.weekly] {
                    if let Some(job) = slot
                        && job.due_at <= now
                    {
                        due_jobs.push(job.clone());
                        while job.due_at <= now {
                            job.due_at += job.period;
                        }
                    }
                }
            }
        }

        let count = due_jobs.len();
        if count > 0 {
            debug!(due_count = count, "JobRegistry::run_due: dispatching due jobs");
        }

        for job in due_jobs {
            let registry = Arc::clone(&self);
            tokio::spawn(async move {
                debug!(session_id = %job.session_id, subject = %job.subject, kind = %job.kind, "run_due: job fired");
                let outcome = registry.handler.run(&job).await;
                if outcome == JobOutcome::Cancel {
                    debug!(session_id = %job.session_id, subject = %job.subject, kind = %job.kind, "run_due: handler requested cancel");
                    registry.remove_job(&job.session_id, &job.subject, job.kind).await;
                }
            });
        }

        count
    }

    /// Total number of registered jobs (each daily and weekly counts as one)
    pub async fn job_count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner
            .jobs
            .values()
            .map(|pair| pair.daily.iter().count() + pair.weekly.iter().count())
            .sum()
    }

    /// Remove one side of a pair, dropping the pair entirely once both are gone
    async fn remove_job(&self, session_id: &str, subject: &str, kind: JobKind) {
        debug!(%session_id, %subject, %kind, "JobRegistry::remove_job: called");
        let key = (session_id.to_string(), subject.to_string());

        let mut inner = self.inner.lock().await;
        let Some(pair) = inner.jobs.get_mut(&key) else {
            return;
        };

        match kind {
            JobKind::Daily => pair.daily = None,
            JobKind::Weekly => pair.weekly = None,
        }

        if pair.is_empty() {
            inner.jobs.remove(&key);
            inner.order.retain(|k| k != &key);
        }
    }
}

/// Next time `time` occurs strictly after `now`
fn next_daily_occurrence(now: DateTime<Local>, time: NaiveTime) -> DateTime<Local> {
    let today = now.date_naive();

    if let Some(candidate) = today.and_time(time).and_local_timezone(Local).earliest()
        && candidate > now
    {
        return candidate;
    }

    (today + Duration::days(1))
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or(now + Duration::days(1))
}
