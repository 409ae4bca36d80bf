// In-process fakes for the pipeline's outbound collaborators

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use logrca_core::LogEntry;
use logrca_rag::{LlmClient, LlmError, LogSource};

/// Returns a canned completion and keeps every prompt it was sent
pub struct FakeLlm {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| LlmError::RequestFailed("connection refused".to_string()))
    }

    fn model(&self) -> &str {
        "fake"
    }

    fn provider(&self) -> &str {
        "fake"
    }
}

pub type FetchCall = (String, Option<DateTime<Utc>>, Option<DateTime<Utc>>);

/// Serves a fixed set of lines and counts fetches
pub struct FakeLogSource {
    entries: Vec<LogEntry>,
    pub fetches: AtomicUsize,
    pub last_call: Mutex<Option<FetchCall>>,
}

impl FakeLogSource {
    pub fn with_entries(entries: &[&str]) -> Self {
        Self {
            entries: entries.iter().map(|e| e.to_string()).collect(),
            fetches: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn empty() -> Self {
        Self::with_entries(&[])
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSource for FakeLogSource {
    async fn fetch_logs(
        &self,
        service: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<LogEntry> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some((service.to_string(), start, end));
        self.entries.clone()
    }
}
