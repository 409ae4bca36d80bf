// RCA engine
// Orchestrates: service + time extraction -> log fetch -> prompt -> LLM analysis

use std::sync::Arc;

use chrono::Utc;
use logrca_core::{LogEntry, RcaReport, TimeRange};
use thiserror::Error;
use tracing::info;

use crate::extractor::{Extractor, ServiceExtractor, TimeRangeExtractor};
use crate::llm_client::{LlmClient, LlmError};
use crate::loki_client::LogSource;

#[derive(Error, Debug)]
pub enum RcaError {
    #[error("Could not determine which service to analyze. Please specify the service in your question.")]
    UnknownService,

    #[error("No logs found for {service} in the specified time range.")]
    NoLogs { service: String },

    #[error("Language model call failed: {0}")]
    Llm(#[from] LlmError),
}

pub struct RcaEngine {
    logs: Arc<dyn LogSource>,
    llm: Arc<dyn LlmClient>,
    services: Box<dyn Extractor<Entity = String>>,
    time_ranges: Box<dyn Extractor<Entity = TimeRange>>,
}

impl RcaEngine {
    pub fn new(logs: Arc<dyn LogSource>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            logs,
            llm,
            services: Box::new(ServiceExtractor::default()),
            time_ranges: Box::new(TimeRangeExtractor::new()),
        }
    }

    pub fn with_service_extractor(
        mut self,
        extractor: impl Extractor<Entity = String> + 'static,
    ) -> Self {
        self.services = Box::new(extractor);
        self
    }

    pub fn with_time_extractor(
        mut self,
        extractor: impl Extractor<Entity = TimeRange> + 'static,
    ) -> Self {
        self.time_ranges = Box::new(extractor);
        self
    }

    /// Answer a free-text "why did X fail" question.
    /// No fetch happens unless a known service is named.
    pub async fn analyze(&self, question: &str) -> Result<RcaReport, RcaError> {
        let service = self
            .services
            .extract(question)
            .into_iter()
            .next()
            .ok_or(RcaError::UnknownService)?;

        let time_range = self
            .time_ranges
            .extract(question)
            .into_iter()
            .next()
            .unwrap_or_else(|| TimeRange::default_window(Utc::now()));

        info!(
            service = %service,
            start = %time_range.start(),
            end = %time_range.end(),
            "RCA window resolved"
        );

        let logs = self
            .logs
            .fetch_logs(&service, Some(time_range.start()), Some(time_range.end()))
            .await;

        if logs.is_empty() {
            return Err(RcaError::NoLogs { service });
        }

        info!(service = %service, logs = logs.len(), model = self.llm.model(), "Calling LLM for RCA");

        let prompt = build_prompt(question, &service, &logs);
        let analysis = self.llm.generate(&prompt).await?;

        Ok(RcaReport {
            service,
            time_range,
            analysis,
        })
    }
}

/// Root cause prompt; every fetched line is embedded
pub fn build_prompt(question: &str, service: &str, logs: &[LogEntry]) -> String {
    format!(
        r#"You are an expert system analyst performing root cause analysis.
Based on the following logs and the question, provide a detailed analysis of what might have caused the issue.

Question: {}
Service: {}
Relevant Logs:
{}

Please provide:
1. Root Cause: What was the primary cause of the issue?
2. Timeline: When did the issue start and how did it progress?
3. Impact: What was the impact on the service?
4. Recommendations: What steps should be taken to prevent this in the future?

Analysis:"#,
        question,
        service,
        logs.join("\n")
    )
}
