//! LlmClient trait definition

use async_trait::async_trait;

use super::LlmError;

/// Stateless LLM client - each call is independent
///
/// This is the core abstraction for producing summaries. The daemon
/// sends one self-contained prompt per call and reads back plain text;
/// no conversation state is kept between calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single prompt and wait for the full text response
    async fn run(&self, prompt: &str) -> Result<String, LlmError>;
}
