#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::{DateTime, Utc};
use logrca_api::{app, state::AppState};
use logrca_rag::{LlmClient, LlmError, LogSource, ServiceExtractor};
use tower::ServiceExt;

pub struct StubLlm {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubLlm {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for StubLlm {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| LlmError::ApiError("model 'llama2' not found".to_string()))
    }

    fn model(&self) -> &str {
        "stub"
    }

    fn provider(&self) -> &str {
        "stub"
    }
}

pub struct StubLogs {
    entries: Vec<String>,
    pub fetches: AtomicUsize,
    pub bounded: Mutex<Vec<bool>>,
}

impl StubLogs {
    pub fn with_entries(entries: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            entries: entries.iter().map(|e| e.to_string()).collect(),
            fetches: AtomicUsize::new(0),
            bounded: Mutex::new(Vec::new()),
        })
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSource for StubLogs {
    async fn fetch_logs(
        &self,
        _service: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.bounded
            .lock()
            .unwrap()
            .push(start.is_some() && end.is_some());
        self.entries.clone()
    }
}

pub fn test_app(logs: Arc<StubLogs>, summary: Arc<StubLlm>, rca: Arc<StubLlm>) -> Router {
    let state = AppState::new(logs, summary, rca, ServiceExtractor::default());
    app(Arc::new(state))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
