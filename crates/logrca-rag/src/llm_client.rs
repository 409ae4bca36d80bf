// LLM client abstraction
// every completion backend (Ollama, Groq, test fakes) sits behind this trait

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("LLM returned no completion")]
    EmptyResponse,
}

/// Text completion: prompt in, generated text out
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    fn model(&self) -> &str;

    fn provider(&self) -> &str;
}
