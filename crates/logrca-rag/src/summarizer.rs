// Log summarizer
// bounded prefix of log lines -> one prompt -> LLM completion

use std::sync::Arc;

use logrca_core::LogEntry;
use tracing::info;

use crate::llm_client::{LlmClient, LlmError};

/// Most log lines forwarded to the model per summary
pub const MAX_SUMMARY_LOGS: usize = 20;

pub const SUMMARY_INSTRUCTION: &str = "Summarize the following application logs:";

pub struct Summarizer {
    llm: Arc<dyn LlmClient>,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Summarize the first MAX_SUMMARY_LOGS entries; model errors are returned to the caller
    pub async fn summarize(&self, logs: &[LogEntry]) -> Result<String, LlmError> {
        let prompt = build_prompt(logs);
        info!(
            total = logs.len(),
            forwarded = logs.len().min(MAX_SUMMARY_LOGS),
            model = self.llm.model(),
            "Summarizing logs"
        );
        self.llm.generate(&prompt).await
    }
}

pub fn build_prompt(logs: &[LogEntry]) -> String {
    let max_logs = MAX_SUMMARY_LOGS.min(logs.len());
    format!("{}\n{}", SUMMARY_INSTRUCTION, logs[..max_logs].join("\n"))
}
