//! News store error types

use thiserror::Error;

/// Errors that can occur querying the news store
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}
