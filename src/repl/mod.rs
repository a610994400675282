//! Interactive chat for NewsDaemon
//!
//! Provides the conversational surface: schedule setup, cancellation,
//! listing, and test reports, with briefings printed as they arrive.

mod session;

pub use session::ChatSession;

use std::sync::Arc;

use eyre::Result;

use crate::briefing::BriefingHandler;
use crate::config::Config;
use crate::events::EventBus;
use crate::llm;
use crate::news::HttpNewsStore;
use crate::scheduler::{JobRegistry, SchedulerRunner};
use crate::session::{ConversationEngine, SessionStore};
use crate::summarizer::Summarizer;

/// Run the interactive chat
///
/// This is the main entry point for `nd chat`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    // Wire up the service stack
    let news = Arc::new(
        HttpNewsStore::from_config(&config.news).map_err(|e| eyre::eyre!("Failed to create news client: {}", e))?,
    );
    let llm_client = llm::create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;
    let summarizer = Summarizer::new(news, llm_client);

    let sessions = Arc::new(SessionStore::new(config.session.idle_timeout()));
    let events = Arc::new(EventBus::with_default_capacity());

    let handler = BriefingHandler::new(summarizer.clone(), Arc::clone(&sessions), Arc::clone(&events));
    let registry = Arc::new(JobRegistry::new(Arc::new(handler)));

    // The scheduler loop lives as long as the chat does
    let runner = SchedulerRunner::new(config.scheduler.clone(), Arc::clone(&registry), Arc::clone(&sessions));
    tokio::spawn(runner.run());

    let engine = Arc::new(ConversationEngine::new(
        sessions,
        registry,
        summarizer,
        Arc::clone(&events),
        config.dialogue.clone(),
    ));

    let session = ChatSession::new(engine, events);
    session.run().await
}
