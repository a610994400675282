//! HTTP-backed news store
//!
//! Talks to an article index service for search and fetches article
//! bodies straight from the publisher, converting HTML to readable text.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{Article, NewsError, NewsStore, QueryWindow};
use crate::config::NewsConfig;

/// Maximum article body size we will convert
const MAX_BODY_BYTES: usize = 1_000_000;

/// HTTP news store client
pub struct HttpNewsStore {
    base_url: String,
    http: Client,
}

impl HttpNewsStore {
    /// Create a new store client from configuration
    pub fn from_config(config: &NewsConfig) -> Result<Self, NewsError> {
        debug!(base_url = %config.base_url, "from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent("newsdaemon/0.1 (article fetch)")
            .build()
            .map_err(NewsError::Network)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }
}

#[async_trait]
impl NewsStore for HttpNewsStore {
    async fn search(&self, keywords: &str, window: QueryWindow, limit: usize) -> Result<Vec<Article>, NewsError> {
        debug!(%keywords, ?window, limit, "search: called");
        let url = format!("{}/v1/articles", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", keywords.to_string()),
                ("from", window.from_date().to_string()),
                ("to", window.to_date().to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(status, "search: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(NewsError::ApiError { status, message: text });
        }

        let body: SearchResponse = response.json().await?;
        debug!(article_count = body.articles.len(), "search: results received");
        Ok(body.articles)
    }

    async fn fetch_content(&self, url: &str) -> Result<String, NewsError> {
        debug!(%url, "fetch_content: called");
        let response = self.http.get(url).send().await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(status, "fetch_content: HTTP error");
            let text = response.text().await.unwrap_or_default();
            return Err(NewsError::ApiError { status, message: text });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await?;

        // Oversized pages are treated as having no extractable text
        if body.len() > MAX_BODY_BYTES {
            debug!(body_len = body.len(), "fetch_content: body too large, skipping");
            return Ok(String::new());
        }

        let text = if content_type.contains("text/html") || content_type.contains("application/xhtml") {
            debug!("fetch_content: converting HTML to text");
            html_to_text(&body)
        } else {
            body
        };

        Ok(text.trim().to_string())
    }
}

/// Convert an HTML page to readable markdown-ish text
fn html_to_text(html: &str) -> String {
    html2md::rewrite_html(html, false)
}

// Article search API response types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    articles: Vec<Article>,
}
