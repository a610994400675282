//! Briefing delivery
//!
//! Bridges the job registry to the summarizer: when a daily or weekly
//! job fires, produce the matching text and emit it on the event bus.
//! A job whose schedule no longer exists in the session store is
//! cancelled instead of firing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::events::{BriefingEvent, EventBus};
use crate::scheduler::{JobHandler, JobKind, JobOutcome, ScheduledJob};
use crate::session::SessionStore;
use crate::summarizer::Summarizer;

/// Produces and delivers briefing text when jobs fire
pub struct BriefingHandler {
    summarizer: Summarizer,
    sessions: Arc<SessionStore>,
    events: Arc<EventBus>,
}

impl BriefingHandler {
    pub fn new(summarizer: Summarizer, sessions: Arc<SessionStore>, events: Arc<EventBus>) -> Self {
        Self {
            summarizer,
            sessions,
            events,
        }
    }
}

#[async_trait]
impl JobHandler for BriefingHandler {
    async fn run(&self, job: &ScheduledJob) -> JobOutcome {
        debug!(
            session_id = %job.session_id,
            subject = %job.subject,
            kind = %job.kind,
            "BriefingHandler::run: called"
        );

        // The schedule is the source of truth; a stale job self-cancels
        if !self.sessions.has_schedule(&job.session_id, &job.subject).await {
            debug!(
                session_id = %job.session_id,
                subject = %job.subject,
                "BriefingHandler::run: schedule gone, cancelling job"
            );
            return JobOutcome::Cancel;
        }

        let text = match job.kind {
            JobKind::Daily => self.summarizer.fetch_latest_summary(&job.subject).await.text,
            JobKind::Weekly => self.summarizer.fetch_weekly_digest(&job.subject).await,
        };

        self.events.emit(BriefingEvent::new(
            &job.session_id,
            &job.subject,
            job.kind,
            text,
        ));

        JobOutcome::Reschedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::news::store::mock::MockNewsStore;
    use crate::news::Article;
    use chrono::{Duration, Local, NaiveDate, NaiveTime};
    use std::time::Duration as StdDuration;

    fn job(kind: JobKind) -> ScheduledJob {
        ScheduledJob {
            session_id: "s1".to_string(),
            subject: "Acme".to_string(),
            kind,
            due_at: Local::now(),
            period: Duration::days(1),
        }
    }

    fn handler_with(articles: Vec<Article>, llm_responses: Vec<&str>) -> (BriefingHandler, Arc<SessionStore>, Arc<EventBus>) {
        let sessions = Arc::new(SessionStore::new(StdDuration::from_secs(1800)));
        let events = Arc::new(EventBus::with_default_capacity());
        let news = Arc::new(MockNewsStore::new(articles));
        let llm = Arc::new(MockLlmClient::new(
            llm_responses.into_iter().map(String::from).collect(),
        ));
        let summarizer = Summarizer::new(news, llm);
        let handler = BriefingHandler::new(summarizer, Arc::clone(&sessions), Arc::clone(&events));
        (handler, sessions, events)
    }

    fn sample_article() -> Article {
        Article::new(
            "Acme Q4 earnings",
            "https://example.com/a",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        )
        .with_content("Revenue rose 12 percent.")
    }

    #[tokio::test]
    async fn test_daily_job_emits_summary() {
        let (handler, sessions, events) = handler_with(vec![sample_article()], vec!["Acme is up."]);
        sessions
            .upsert_schedule("s1", "Acme", NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .await;
        let mut rx = events.subscribe();

        let outcome = handler.run(&job(JobKind::Daily)).await;

        assert_eq!(outcome, JobOutcome::Reschedule);
        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, JobKind::Daily);
        assert!(event.text.contains("Acme is up."));
        assert!(event.text.contains("https://example.com/a"));
    }

    #[tokio::test]
    async fn test_weekly_job_emits_digest() {
        let (handler, sessions, events) = handler_with(vec![sample_article()], vec!["A busy week."]);
        sessions
            .upsert_schedule("s1", "Acme", NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .await;
        let mut rx = events.subscribe();

        let outcome = handler.run(&job(JobKind::Weekly)).await;

        assert_eq!(outcome, JobOutcome::Reschedule);
        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, JobKind::Weekly);
        assert_eq!(event.text, "A busy week.");
    }

    #[tokio::test]
    async fn test_orphaned_job_cancels_without_emitting() {
        let (handler, _sessions, events) = handler_with(vec![sample_article()], vec!["unused"]);
        let mut rx = events.subscribe();

        let outcome = handler.run(&job(JobKind::Daily)).await;

        assert_eq!(outcome, JobOutcome::Cancel);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_daily_without_news_still_emits_notice() {
        let (handler, sessions, events) = handler_with(vec![], vec![]);
        sessions
            .upsert_schedule("s1", "Acme", NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .await;
        let mut rx = events.subscribe();

        let outcome = handler.run(&job(JobKind::Daily)).await;

        assert_eq!(outcome, JobOutcome::Reschedule);
        let event = rx.try_recv().unwrap();
        assert!(event.text.contains("No news found for Acme"));
    }
}
