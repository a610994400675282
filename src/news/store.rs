//! NewsStore trait and article types

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NewsError;

/// A news article returned by the store
///
/// `content` is populated only when the store already has the article
/// body indexed; otherwise callers fetch it separately via the link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Create an article with no indexed body
    pub fn new(title: impl Into<String>, link: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            date,
            content: None,
        }
    }

    /// Attach an indexed body
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Date window for an article search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryWindow {
    /// Articles published on a single day
    Day(NaiveDate),
    /// Articles published within an inclusive date range
    Range { start: NaiveDate, end: NaiveDate },
}

impl QueryWindow {
    /// First day covered by the window
    pub fn from_date(&self) -> NaiveDate {
        match self {
            QueryWindow::Day(d) => *d,
            QueryWindow::Range { start, .. } => *start,
        }
    }

    /// Last day covered by the window
    pub fn to_date(&self) -> NaiveDate {
        match self {
            QueryWindow::Day(d) => *d,
            QueryWindow::Range { end, .. } => *end,
        }
    }
}

/// Read-only article index
///
/// The store answers keyword searches over a date window and fetches
/// raw article bodies. It never interprets or summarizes content.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Search for articles matching the keywords within the window,
    /// newest first, up to `limit` results
    async fn search(&self, keywords: &str, window: QueryWindow, limit: usize) -> Result<Vec<Article>, NewsError>;

    /// Fetch the readable text of an article by its link
    ///
    /// Returns an empty string when the page has no extractable text.
    async fn fetch_content(&self, url: &str) -> Result<String, NewsError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock news store for unit tests
    pub struct MockNewsStore {
        articles: Vec<Article>,
        content: String,
        fail: bool,
        search_count: AtomicUsize,
    }

    impl MockNewsStore {
        pub fn new(articles: Vec<Article>) -> Self {
            debug!(article_count = %articles.len(), "MockNewsStore::new: called");
            Self {
                articles,
                content: String::new(),
                fail: false,
                search_count: AtomicUsize::new(0),
            }
        }

        /// Store that fails every call
        pub fn failing() -> Self {
            Self {
                articles: vec![],
                content: String::new(),
                fail: true,
                search_count: AtomicUsize::new(0),
            }
        }

        /// Set the body returned by fetch_content
        pub fn with_content(mut self, content: impl Into<String>) -> Self {
            self.content = content.into();
            self
        }

        pub fn search_count(&self) -> usize {
            self.search_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NewsStore for MockNewsStore {
        async fn search(&self, _keywords: &str, _window: QueryWindow, limit: usize) -> Result<Vec<Article>, NewsError> {
            debug!("MockNewsStore::search: called");
            self.search_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NewsError::ApiError {
                    status: 500,
                    message: "mock failure".to_string(),
                });
            }
            Ok(self.articles.iter().take(limit).cloned().collect())
        }

        async fn fetch_content(&self, _url: &str) -> Result<String, NewsError> {
            debug!("MockNewsStore::fetch_content: called");
            if self.fail {
                return Err(NewsError::ApiError {
                    status: 500,
                    message: "mock failure".to_string(),
                });
            }
            Ok(self.content.clone())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_store_respects_limit() {
            let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
            let store = MockNewsStore::new(vec![
                Article::new("One", "https://example.com/1", date),
                Article::new("Two", "https://example.com/2", date),
                Article::new("Three", "https://example.com/3", date),
            ]);

            let results = store.search("acme", QueryWindow::Day(date), 2).await.unwrap();
            assert_eq!(results.len(), 2);
            assert_eq!(store.search_count(), 1);
        }

        #[tokio::test]
        async fn test_failing_store_errors() {
            let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
            let store = MockNewsStore::failing();

            assert!(store.search("acme", QueryWindow::Day(date), 1).await.is_err());
            assert!(store.fetch_content("https://example.com/1").await.is_err());
        }
    }
}
