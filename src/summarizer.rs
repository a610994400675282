//! Article summarizer
//!
//! Turns news store results into natural-language briefing text via the
//! LLM. Stateless; collaborator failures are absorbed into sentinel
//! messages and never cross this boundary as errors.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, warn};

use crate::llm::LlmClient;
use crate::news::{Article, NewsStore, QueryWindow};

/// How many articles a weekly digest covers
const DIGEST_ARTICLE_LIMIT: usize = 5;

/// How much of each article body the digest prompt quotes
const DIGEST_EXCERPT_CHARS: usize = 200;

/// Result of a latest-news summary request
///
/// `found` is false whenever no real summary could be produced; `text`
/// then carries the human-readable explanation instead.
#[derive(Debug, Clone)]
pub struct LatestSummary {
    pub text: String,
    pub found: bool,
}

impl LatestSummary {
    fn missing(text: String) -> Self {
        Self { text, found: false }
    }
}

/// Produces briefing text for a subject from the news store and LLM
#[derive(Clone)]
pub struct Summarizer {
    news: Arc<dyn NewsStore>,
    llm: Arc<dyn LlmClient>,
}

impl Summarizer {
    pub fn new(news: Arc<dyn NewsStore>, llm: Arc<dyn LlmClient>) -> Self {
        Self { news, llm }
    }

    /// Summarize today's top article for a subject
    pub async fn fetch_latest_summary(&self, subject: &str) -> LatestSummary {
        debug!(%subject, "fetch_latest_summary: called");
        let today = Local::now().date_naive();

        let articles = match self.news.search(subject, QueryWindow::Day(today), 1).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!(%subject, error = %e, "fetch_latest_summary: search failed");
                return LatestSummary::missing(format!("No news found for {} today.", subject));
            }
        };

        let Some(article) = articles.into_iter().next() else {
            debug!(%subject, "fetch_latest_summary: no articles today");
            return LatestSummary::missing(format!("No news found for {} today.", subject));
        };

        let content = match &article.content {
            Some(c) if !c.is_empty() => c.clone(),
            _ => match self.news.fetch_content(&article.link).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(link = %article.link, error = %e, "fetch_latest_summary: content fetch failed");
                    String::new()
                }
            },
        };

        if content.trim().is_empty() {
            debug!(%subject, "fetch_latest_summary: article body unavailable");
            return LatestSummary::missing(format!(
                "Found an article about {} but couldn't fetch its body.",
                subject
            ));
        }

        let prompt = summary_prompt(&article.title, &content, &article.link);
        match self.llm.run(&prompt).await {
            Ok(summary) => {
                debug!(%subject, "fetch_latest_summary: summary produced");
                LatestSummary {
                    text: format!("{}\n\nSource: {}", summary, article.link),
                    found: true,
                }
            }
            Err(e) => {
                warn!(%subject, error = %e, "fetch_latest_summary: LLM call failed");
                LatestSummary::missing(format!(
                    "Found an article about {} but couldn't summarize it right now.",
                    subject
                ))
            }
        }
    }

    /// Digest the past week's articles for a subject
    pub async fn fetch_weekly_digest(&self, subject: &str) -> String {
        debug!(%subject, "fetch_weekly_digest: called");
        let today = Local::now().date_naive();
        let start = today - chrono::Duration::days(7);
        let window = QueryWindow::Range { start, end: today };

        let nothing_to_report = format!("No news for {} in the last 7 days.", subject);

        let articles = match self.news.search(subject, window, DIGEST_ARTICLE_LIMIT).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!(%subject, error = %e, "fetch_weekly_digest: search failed");
                return nothing_to_report;
            }
        };

        if articles.is_empty() {
            debug!(%subject, "fetch_weekly_digest: no articles this week");
            return nothing_to_report;
        }

        let prompt = digest_prompt(subject, &articles);
        match self.llm.run(&prompt).await {
            Ok(digest) => {
                debug!(%subject, "fetch_weekly_digest: digest produced");
                digest
            }
            Err(e) => {
                warn!(%subject, error = %e, "fetch_weekly_digest: LLM call failed");
                nothing_to_report
            }
        }
    }
}

fn summary_prompt(title: &str, content: &str, link: &str) -> String {
    format!(
        "Summarize this news article in 3-4 plain sentences. \
         Mention concrete numbers when the article gives them. \
         Output only the summary.\n\n\
         Title: {}\n\
         Source: {}\n\n\
         {}",
        title, link, content
    )
}

fn digest_prompt(subject: &str, articles: &[Article]) -> String {
    let mut prompt = format!(
        "Write a weekly news digest about {}. \
         Group the items below into a few short paragraphs covering the main developments. \
         Output only the digest.\n\n",
        subject
    );

    for article in articles {
        let excerpt: String = article
            .content
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(DIGEST_EXCERPT_CHARS)
            .collect();
        prompt.push_str(&format!("- {} ({}): {}\n", article.title, article.date, excerpt));
    }

    prompt
}
