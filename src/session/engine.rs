//! Session conversation state machine
//!
//! One free-text turn at a time: each message is interpreted against
//! the session's pending task step, and the reply plus any side effects
//! (registering or cancelling jobs, spawning a test report) happen
//! before the turn returns. Every reply is plain human-readable text.

use std::sync::Arc;

use chrono::{Local, NaiveTime};
use tracing::debug;

use super::store::SessionStore;
use super::types::{PendingStep, PendingTask, Schedule};
use crate::config::DialogueConfig;
use crate::events::{BriefingEvent, EventBus};
use crate::scheduler::{JobKind, JobRegistry};
use crate::summarizer::Summarizer;

/// Reply for a message that arrives with no pending task
const IDLE_REPLY: &str = "Nothing in progress right now. Ask me to set up, list, test, or cancel a briefing schedule.";

/// Reply when a time input can't be parsed
const TIME_FORMAT_REPLY: &str = "I couldn't read that as a time. Try something like 09:00 or 0930.";

/// Drives the per-session dialogue
pub struct ConversationEngine {
    sessions: Arc<SessionStore>,
    registry: Arc<JobRegistry>,
    summarizer: Summarizer,
    events: Arc<EventBus>,
    dialogue: DialogueConfig,
}

impl ConversationEngine {
    pub fn new(
        sessions: Arc<SessionStore>,
        registry: Arc<JobRegistry>,
        summarizer: Summarizer,
        events: Arc<EventBus>,
        dialogue: DialogueConfig,
    ) -> Self {
        Self {
            sessions,
            registry,
            summarizer,
            events,
            dialogue,
        }
    }

    /// Begin the schedule-creation dialogue
    pub async fn start_conversation(&self, session_id: &str) -> String {
        debug!(%session_id, "ConversationEngine::start_conversation: called");
        self.sessions
            .set_pending(session_id, PendingTask::awaiting_company_name())
            .await;

        "Which company would you like daily briefings on?".to_string()
    }

    /// Begin the cancellation dialogue
    pub async fn start_cancellation(&self, session_id: &str) -> String {
        debug!(%session_id, "ConversationEngine::start_cancellation: called");
        let schedules = self.sessions.schedules(session_id).await;

        match schedules.len() {
            0 => {
                debug!(%session_id, "start_cancellation: nothing to cancel");
                "You have no schedules to cancel.".to_string()
            }
            1 => {
                let subject = schedules[0].subject.clone();
                debug!(%session_id, %subject, "start_cancellation: single schedule, asking to confirm");
                self.sessions
                    .set_pending(session_id, PendingTask::awaiting_cancellation_confirmation(&subject))
                    .await;
                format!("Cancel the daily briefing for {}? (yes/no)", subject)
            }
            _ => {
                debug!(%session_id, count = schedules.len(), "start_cancellation: multiple schedules, listing");
                self.sessions
                    .set_pending(session_id, PendingTask::awaiting_cancellation_choice())
                    .await;
                format!(
                    "Which schedule should I cancel?\n{}Enter a number.",
                    format_schedule_list(&schedules)
                )
            }
        }
    }

    /// Enumerate the session's schedules
    pub async fn list_schedules(&self, session_id: &str) -> String {
        debug!(%session_id, "ConversationEngine::list_schedules: called");
        let schedules = self.sessions.schedules(session_id).await;

        if schedules.is_empty() {
            "You have no schedules.".to_string()
        } else {
            format!("Your schedules:\n{}", format_schedule_list(&schedules))
        }
    }

    /// Run a weekly digest immediately, for testing delivery
    pub async fn trigger_report_test(&self, session_id: &str) -> String {
        debug!(%session_id, "ConversationEngine::trigger_report_test: called");
        let schedules = self.sessions.schedules(session_id).await;

        match schedules.len() {
            0 => {
                debug!(%session_id, "trigger_report_test: no schedules");
                "Register a schedule first, then you can test reports.".to_string()
            }
            1 => {
                let subject = schedules[0].subject.clone();
                debug!(%session_id, %subject, "trigger_report_test: single schedule, spawning digest");
                self.spawn_report(session_id, &subject);
                format!("Generating a test report for {} now. It will arrive shortly.", subject)
            }
            _ => {
                debug!(%session_id, count = schedules.len(), "trigger_report_test: multiple schedules, listing");
                self.sessions
                    .set_pending(session_id, PendingTask::awaiting_report_test_choice())
                    .await;
                format!(
                    "Which subject should I report on?\n{}Enter a number.",
                    format_schedule_list(&schedules)
                )
            }
        }
    }

    /// Interpret one free-text message against the session's pending step
    pub async fn handle_message(&self, session_id: &str, text: &str) -> String {
        debug!(%session_id, "ConversationEngine::handle_message: called");
        let Some(task) = self.sessions.get_pending(session_id).await else {
            debug!(%session_id, "handle_message: no pending task, idle reply");
            return IDLE_REPLY.to_string();
        };

        match task.step {
            PendingStep::AwaitingCompanyName => self.handle_company_name(session_id, text).await,
            PendingStep::AwaitingScheduleTime => self.handle_schedule_time(session_id, &task, text).await,
            PendingStep::AwaitingCancellationChoice => self.handle_cancellation_choice(session_id, text).await,
            PendingStep::AwaitingCancellationConfirmation => {
                self.handle_cancellation_confirmation(session_id, &task, text).await
            }
            PendingStep::AwaitingReportTestChoice => self.handle_report_test_choice(session_id, text).await,
        }
    }

    async fn handle_company_name(&self, session_id: &str, text: &str) -> String {
        let subject = text.trim();
        debug!(%session_id, %subject, "handle_company_name: called");

        if subject.is_empty() {
            return "Please give me a company name.".to_string();
        }

        // Deliberately blocks the turn: the user is waiting for proof
        // that we can actually find news on this subject.
        let summary = self.summarizer.fetch_latest_summary(subject).await;

        if !summary.found {
            debug!(%session_id, %subject, "handle_company_name: no usable news, ending dialogue");
            self.sessions.clear_pending(session_id).await;
            return summary.text;
        }

        debug!(%session_id, %subject, "handle_company_name: summary found, asking for time");
        self.sessions
            .set_pending(session_id, PendingTask::awaiting_schedule_time(subject))
            .await;

        format!(
            "{}\n\nWhat time should I send the daily briefing? (for example 09:00)",
            summary.text
        )
    }

    async fn handle_schedule_time(&self, session_id: &str, task: &PendingTask, text: &str) -> String {
        debug!(%session_id, "handle_schedule_time: called");

        // Negative intent wins over any digits also present
        if self.dialogue.is_negative(text) {
            debug!(%session_id, "handle_schedule_time: negative intent, cancelling setup");
            self.sessions.clear_pending(session_id).await;
            return "Okay, I've stopped this setup.".to_string();
        }

        let Some(subject) = task.subject.clone() else {
            debug!(%session_id, "handle_schedule_time: pending task lost its subject, resetting");
            self.sessions.clear_pending(session_id).await;
            return IDLE_REPLY.to_string();
        };

        let Some(daily_time) = parse_daily_time(text) else {
            debug!(%session_id, "handle_schedule_time: unparseable time, staying in step");
            return TIME_FORMAT_REPLY.to_string();
        };

        debug!(%session_id, %subject, %daily_time, "handle_schedule_time: registering schedule");
        self.sessions.upsert_schedule(session_id, &subject, daily_time).await;
        self.registry
            .schedule(session_id, &subject, daily_time, Local::now())
            .await;
        self.sessions.clear_pending(session_id).await;

        format!(
            "Done. I'll brief you on {} every day at {}, plus a weekly digest.",
            subject,
            daily_time.format("%H:%M")
        )
    }

    async fn handle_cancellation_choice(&self, session_id: &str, text: &str) -> String {
        debug!(%session_id, "handle_cancellation_choice: called");
        let schedules = self.sessions.schedules(session_id).await;

        match parse_choice(text, schedules.len()) {
            Choice::NotANumber => "Please enter a number.".to_string(),
            Choice::OutOfRange => "That number isn't on the list.".to_string(),
            Choice::Valid(idx) => {
                let subject = schedules[idx].subject.clone();
                debug!(%session_id, %subject, "handle_cancellation_choice: subject chosen, asking to confirm");
                self.sessions
                    .set_pending(session_id, PendingTask::awaiting_cancellation_confirmation(&subject))
                    .await;
                format!("Cancel the daily briefing for {}? (yes/no)", subject)
            }
        }
    }

    async fn handle_cancellation_confirmation(&self, session_id: &str, task: &PendingTask, text: &str) -> String {
        debug!(%session_id, "handle_cancellation_confirmation: called");

        let Some(subject) = task.subject.clone() else {
            debug!(%session_id, "handle_cancellation_confirmation: pending task lost its subject, resetting");
            self.sessions.clear_pending(session_id).await;
            return IDLE_REPLY.to_string();
        };

        if self.dialogue.is_affirmative(text) {
            debug!(%session_id, %subject, "handle_cancellation_confirmation: confirmed, cancelling");
            // Jobs go first so no job ever outlives its schedule
            self.registry.cancel(session_id, &subject).await;
            self.sessions.remove_schedule(session_id, &subject).await;
            self.sessions.clear_pending(session_id).await;
            format!("Cancelled the daily briefing for {}.", subject)
        } else {
            debug!(%session_id, %subject, "handle_cancellation_confirmation: not confirmed, keeping");
            self.sessions.clear_pending(session_id).await;
            "Okay, keeping the schedule.".to_string()
        }
    }

    async fn handle_report_test_choice(&self, session_id: &str, text: &str) -> String {
        debug!(%session_id, "handle_report_test_choice: called");
        let schedules = self.sessions.schedules(session_id).await;

        match parse_choice(text, schedules.len()) {
            Choice::NotANumber => "Please enter a number.".to_string(),
            Choice::OutOfRange => "That number isn't on the list.".to_string(),
            Choice::Valid(idx) => {
                let subject = schedules[idx].subject.clone();
                debug!(%session_id, %subject, "handle_report_test_choice: subject chosen, spawning digest");
                self.spawn_report(session_id, &subject);
                self.sessions.clear_pending(session_id).await;
                format!("Generating a test report for {} now. It will arrive shortly.", subject)
            }
        }
    }

    /// Run a weekly digest in the background and emit it on the bus
    fn spawn_report(&self, session_id: &str, subject: &str) {
        let summarizer = self.summarizer.clone();
        let events = Arc::clone(&self.events);
        let session_id = session_id.to_string();
        let subject = subject.to_string();

        tokio::spawn(async move {
            let digest = summarizer.fetch_weekly_digest(&subject).await;
            events.emit(BriefingEvent::new(session_id, subject, JobKind::Weekly, digest));
        });
    }
}

fn format_schedule_list(schedules: &[Schedule]) -> String {
    let mut out = String::new();
    for (i, schedule) in schedules.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} (daily at {})\n",
            i + 1,
            schedule.subject,
            schedule.daily_time.format("%H:%M")
        ));
    }
    out
}

/// Outcome of parsing a 1-based menu choice
enum Choice {
    Valid(usize),
    NotANumber,
    OutOfRange,
}

/// Parse a 1-based index against a list of `len` entries
///
/// The list is re-derived from live session state at reply time, so
/// indices can shift if schedules changed since the menu was shown.
fn parse_choice(input: &str, len: usize) -> Choice {
    match input.trim().parse::<usize>() {
        Err(_) => Choice::NotANumber,
        Ok(n) if n == 0 || n > len => Choice::OutOfRange,
        Ok(n) => Choice::Valid(n - 1),
    }
}

/// Extract a daily time from free text
///
/// Keeps only ASCII digits: exactly 2 digits mean a whole hour, exactly
/// 4 mean HHMM. Anything else, including out-of-range values like
/// "2560", is rejected.
fn parse_daily_time(input: &str) -> Option<NaiveTime> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    let candidate = match digits.len() {
        2 => format!("{}:00", digits),
        4 => format!("{}:{}", &digits[..2], &digits[2..]),
        _ => return None,
    };

    NaiveTime::parse_from_str(&candidate, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::news::store::mock::MockNewsStore;
    use crate::news::Article;
    use crate::scheduler::{JobHandler, JobOutcome, ScheduledJob};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::time::Duration;

    struct NoopHandler;

    #[async_trait]
    impl JobHandler for NoopHandler {
        async fn run(&self, _job: &ScheduledJob) -> JobOutcome {
            JobOutcome::Reschedule
        }
    }

    struct Harness {
        engine: ConversationEngine,
        sessions: Arc<SessionStore>,
        registry: Arc<JobRegistry>,
        events: Arc<EventBus>,
    }

    impl Harness {
        fn new(articles: Vec<Article>, llm_responses: Vec<&str>) -> Self {
            let sessions = Arc::new(SessionStore::new(Duration::from_secs(1800)));
            let registry = Arc::new(JobRegistry::new(Arc::new(NoopHandler)));
            let events = Arc::new(EventBus::with_default_capacity());

            let news = Arc::new(MockNewsStore::new(articles));
            let llm = Arc::new(MockLlmClient::new(
                llm_responses.into_iter().map(String::from).collect(),
            ));
            let summarizer = Summarizer::new(news, llm);

            let engine = ConversationEngine::new(
                Arc::clone(&sessions),
                Arc::clone(&registry),
                summarizer,
                Arc::clone(&events),
                DialogueConfig::default(),
            );

            Self {
                engine,
                sessions,
                registry,
                events,
            }
        }

        fn with_article(llm_responses: Vec<&str>) -> Self {
            let article = Article::new(
                "Acme Q4 earnings",
                "https://example.com/a",
                NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            )
            .with_content("Revenue rose 12 percent.");
            Self::new(vec![article], llm_responses)
        }

        async fn seed_schedule(&self, session_id: &str, subject: &str, h: u32, m: u32) {
            let t = NaiveTime::from_hms_opt(h, m, 0).unwrap();
            self.sessions.upsert_schedule(session_id, subject, t).await;
            self.registry.schedule(session_id, subject, t, Local::now()).await;
        }

        async fn step(&self, session_id: &str) -> Option<PendingStep> {
            self.sessions.get_pending(session_id).await.map(|t| t.step)
        }
    }

    // === Entry points ===

    #[tokio::test]
    async fn test_start_conversation_prompts_for_company() {
        let h = Harness::with_article(vec![]);

        let reply = h.engine.start_conversation("s1").await;

        assert!(reply.contains("company"));
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingCompanyName));
    }

    #[tokio::test]
    async fn test_idle_message_creates_no_state() {
        let h = Harness::with_article(vec![]);

        let reply = h.engine.handle_message("s2", "hello").await;

        assert_eq!(reply, IDLE_REPLY);
        assert!(!h.sessions.has_session("s2").await);
    }

    #[tokio::test]
    async fn test_list_schedules_empty() {
        let h = Harness::with_article(vec![]);

        let reply = h.engine.list_schedules("s1").await;

        assert!(reply.contains("no schedules"));
        assert!(!h.sessions.has_session("s1").await);
    }

    #[tokio::test]
    async fn test_list_schedules_enumerates() {
        let h = Harness::with_article(vec![]);
        h.seed_schedule("s1", "Acme", 9, 0).await;
        h.seed_schedule("s1", "Globex", 14, 30).await;

        let reply = h.engine.list_schedules("s1").await;

        assert!(reply.contains("1. Acme (daily at 09:00)"));
        assert!(reply.contains("2. Globex (daily at 14:30)"));
    }

    // === Schedule creation dialogue ===

    #[tokio::test]
    async fn test_company_with_news_moves_to_time_step() {
        let h = Harness::with_article(vec!["Acme grew revenue."]);
        h.engine.start_conversation("s1").await;

        let reply = h.engine.handle_message("s1", "Acme").await;

        assert!(reply.contains("Acme grew revenue."));
        assert!(reply.contains("What time"));
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingScheduleTime));
    }

    #[tokio::test]
    async fn test_company_without_news_ends_dialogue() {
        let h = Harness::new(vec![], vec![]);
        h.engine.start_conversation("s1").await;

        let reply = h.engine.handle_message("s1", "Acme").await;

        assert!(reply.contains("No news found for Acme"));
        assert_eq!(h.step("s1").await, None);
    }

    #[tokio::test]
    async fn test_schedule_time_completes_registration() {
        let h = Harness::with_article(vec!["Acme grew revenue."]);
        h.engine.start_conversation("s1").await;
        h.engine.handle_message("s1", "Acme").await;

        let reply = h.engine.handle_message("s1", "09:00").await;

        assert!(reply.contains("Acme"));
        assert!(reply.contains("09:00"));
        assert_eq!(h.step("s1").await, None);

        let schedules = h.sessions.schedules("s1").await;
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].subject, "Acme");
        assert_eq!(h.registry.job_count().await, 2);
    }

    #[tokio::test]
    async fn test_time_format_error_stays_in_step() {
        let h = Harness::with_article(vec!["Acme grew revenue."]);
        h.engine.start_conversation("s1").await;
        h.engine.handle_message("s1", "Acme").await;

        let reply = h.engine.handle_message("s1", "abcdefg").await;

        assert_eq!(reply, TIME_FORMAT_REPLY);
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingScheduleTime));

        // A valid retry still completes the dialogue
        let reply = h.engine.handle_message("s1", "0930").await;
        assert!(reply.contains("09:30"));
        assert_eq!(h.step("s1").await, None);
    }

    #[tokio::test]
    async fn test_negative_intent_cancels_setup_despite_digits() {
        let h = Harness::with_article(vec!["Acme grew revenue."]);
        h.engine.start_conversation("s1").await;
        h.engine.handle_message("s1", "Acme").await;

        let reply = h.engine.handle_message("s1", "아니 0930").await;

        assert!(reply.contains("stopped this setup"));
        assert_eq!(h.step("s1").await, None);
        assert_eq!(h.registry.job_count().await, 0);
    }

    // === Cancellation dialogue ===

    #[tokio::test]
    async fn test_cancellation_with_no_schedules() {
        let h = Harness::with_article(vec![]);

        let reply = h.engine.start_cancellation("s1").await;

        assert!(reply.contains("no schedules to cancel"));
        assert!(!h.sessions.has_session("s1").await);
    }

    #[tokio::test]
    async fn test_cancellation_single_schedule_confirmed() {
        let h = Harness::with_article(vec![]);
        h.seed_schedule("s1", "Acme", 9, 0).await;

        let reply = h.engine.start_cancellation("s1").await;
        assert!(reply.contains("Cancel the daily briefing for Acme"));
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingCancellationConfirmation));

        let reply = h.engine.handle_message("s1", "네").await;
        assert!(reply.contains("Cancelled the daily briefing for Acme"));
        assert_eq!(h.step("s1").await, None);
        assert!(h.sessions.schedules("s1").await.is_empty());
        assert_eq!(h.registry.job_count().await, 0);
    }

    #[tokio::test]
    async fn test_cancellation_declined_keeps_schedule() {
        let h = Harness::with_article(vec![]);
        h.seed_schedule("s1", "Acme", 9, 0).await;
        h.engine.start_cancellation("s1").await;

        let reply = h.engine.handle_message("s1", "hmm").await;

        assert!(reply.contains("keeping the schedule"));
        assert_eq!(h.step("s1").await, None);
        assert_eq!(h.sessions.schedules("s1").await.len(), 1);
        assert_eq!(h.registry.job_count().await, 2);
    }

    #[tokio::test]
    async fn test_cancellation_choice_selects_by_index() {
        let h = Harness::with_article(vec![]);
        h.seed_schedule("s1", "Acme", 9, 0).await;
        h.seed_schedule("s1", "Globex", 10, 0).await;
        h.seed_schedule("s1", "Initech", 11, 0).await;

        let reply = h.engine.start_cancellation("s1").await;
        assert!(reply.contains("1. Acme"));
        assert!(reply.contains("3. Initech"));
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingCancellationChoice));

        let reply = h.engine.handle_message("s1", "2").await;
        assert!(reply.contains("Globex"));

        h.engine.handle_message("s1", "yes").await;

        let remaining: Vec<_> = h
            .sessions
            .schedules("s1")
            .await
            .into_iter()
            .map(|s| s.subject)
            .collect();
        assert_eq!(remaining, vec!["Acme", "Initech"]);
        assert_eq!(h.registry.job_count().await, 4);
    }

    #[tokio::test]
    async fn test_cancellation_choice_out_of_range_stays() {
        let h = Harness::with_article(vec![]);
        h.seed_schedule("s1", "Acme", 9, 0).await;
        h.seed_schedule("s1", "Globex", 10, 0).await;
        h.seed_schedule("s1", "Initech", 11, 0).await;
        h.engine.start_cancellation("s1").await;

        let reply = h.engine.handle_message("s1", "0").await;
        assert!(reply.contains("isn't on the list"));
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingCancellationChoice));

        let reply = h.engine.handle_message("s1", "4").await;
        assert!(reply.contains("isn't on the list"));
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingCancellationChoice));
    }

    #[tokio::test]
    async fn test_cancellation_choice_non_numeric_stays() {
        let h = Harness::with_article(vec![]);
        h.seed_schedule("s1", "Acme", 9, 0).await;
        h.seed_schedule("s1", "Globex", 10, 0).await;
        h.engine.start_cancellation("s1").await;

        let reply = h.engine.handle_message("s1", "x").await;

        assert!(reply.contains("enter a number"));
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingCancellationChoice));
    }

    // === Report test ===

    #[tokio::test]
    async fn test_report_test_requires_schedule() {
        let h = Harness::with_article(vec![]);

        let reply = h.engine.trigger_report_test("s1").await;

        assert!(reply.contains("Register a schedule first"));
        assert!(!h.sessions.has_session("s1").await);
    }

    #[tokio::test]
    async fn test_report_test_single_schedule_emits_digest() {
        let h = Harness::with_article(vec!["A busy week for Acme."]);
        h.seed_schedule("s1", "Acme", 9, 0).await;

        let mut rx = h.events.subscribe();
        let reply = h.engine.trigger_report_test("s1").await;

        assert!(reply.contains("test report for Acme"));
        assert_eq!(h.step("s1").await, None);

        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("digest should be emitted")
            .expect("channel open");
        assert_eq!(event.session_id, "s1");
        assert_eq!(event.subject, "Acme");
        assert_eq!(event.kind, JobKind::Weekly);
        assert_eq!(event.text, "A busy week for Acme.");
    }

    #[tokio::test]
    async fn test_report_test_choice_selects_subject() {
        let h = Harness::with_article(vec!["Globex digest."]);
        h.seed_schedule("s1", "Acme", 9, 0).await;
        h.seed_schedule("s1", "Globex", 10, 0).await;

        let reply = h.engine.trigger_report_test("s1").await;
        assert!(reply.contains("1. Acme"));
        assert_eq!(h.step("s1").await, Some(PendingStep::AwaitingReportTestChoice));

        let mut rx = h.events.subscribe();
        let reply = h.engine.handle_message("s1", "2").await;
        assert!(reply.contains("Globex"));
        assert_eq!(h.step("s1").await, None);

        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("digest should be emitted")
            .expect("channel open");
        assert_eq!(event.subject, "Globex");
    }

    // === Parsing helpers ===

    #[test]
    fn test_parse_daily_time_two_digits() {
        assert_eq!(parse_daily_time("14"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_daily_time("at 14 please"), NaiveTime::from_hms_opt(14, 0, 0));
    }

    #[test]
    fn test_parse_daily_time_four_digits() {
        assert_eq!(parse_daily_time("0900"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_daily_time("1430"), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_daily_time("09:00"), NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn test_parse_daily_time_rejects_garbage() {
        assert_eq!(parse_daily_time("abcdefg"), None);
        assert_eq!(parse_daily_time("123"), None);
        assert_eq!(parse_daily_time("12345"), None);
        assert_eq!(parse_daily_time(""), None);
    }

    #[test]
    fn test_parse_daily_time_rejects_out_of_range() {
        assert_eq!(parse_daily_time("2560"), None);
        assert_eq!(parse_daily_time("99"), None);
    }

    #[test]
    fn test_parse_choice_bounds() {
        assert!(matches!(parse_choice("1", 3), Choice::Valid(0)));
        assert!(matches!(parse_choice(" 3 ", 3), Choice::Valid(2)));
        assert!(matches!(parse_choice("0", 3), Choice::OutOfRange));
        assert!(matches!(parse_choice("4", 3), Choice::OutOfRange));
        assert!(matches!(parse_choice("x", 3), Choice::NotANumber));
    }
}
