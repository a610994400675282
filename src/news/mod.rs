//! News store module for newsdaemon
//!
//! Provides keyword search over an article index and article body fetch.

mod error;
mod http;
pub mod store;

pub use error::NewsError;
pub use http::HttpNewsStore;
pub use store::{Article, NewsStore, QueryWindow};
