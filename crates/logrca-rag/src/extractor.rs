// Entity extraction from free-text RCA questions
// literal substring/keyword rules only, no NLP

use chrono::{DateTime, Utc};
use logrca_core::{TimeRange, DEFAULT_WINDOW_HOURS, KNOWN_SERVICES};

/// Given free text, produce zero or more candidate entities of one kind
pub trait Extractor: Send + Sync {
    type Entity;

    fn extract(&self, text: &str) -> Vec<Self::Entity>;
}

// SERVICE //

/// Case-insensitive substring match against a fixed service registry
#[derive(Debug, Clone)]
pub struct ServiceExtractor {
    services: Vec<String>,
}

impl ServiceExtractor {
    pub fn new<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            services: services.into_iter().map(Into::into).collect(),
        }
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// First registry entry mentioned in the question
    pub fn extract_service(&self, question: &str) -> Option<String> {
        self.extract(question).into_iter().next()
    }
}

impl Default for ServiceExtractor {
    fn default() -> Self {
        Self::new(KNOWN_SERVICES)
    }
}

impl Extractor for ServiceExtractor {
    type Entity = String;

    fn extract(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        self.services
            .iter()
            .filter(|service| text.contains(&service.to_lowercase()))
            .cloned()
            .collect()
    }
}

// TIME RANGE //

/// Keyword-based time window detection.
///
/// Only "yesterday" is recognized, and it maps to the same 24 hours ending now
/// as the fallback window. Anything else ("last hour", "this morning") falls
/// through to the fallback.
#[derive(Debug, Clone, Default)]
pub struct TimeRangeExtractor;

impl TimeRangeExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_at(&self, text: &str, now: DateTime<Utc>) -> Vec<TimeRange> {
        let text = text.to_lowercase();
        if text.contains("yesterday") {
            return vec![TimeRange::ending_at(now, DEFAULT_WINDOW_HOURS)];
        }
        Vec::new()
    }

    /// Detected window, or 24 hours ending now
    pub fn extract_time_range(&self, question: &str) -> TimeRange {
        self.extract_time_range_at(question, Utc::now())
    }

    pub fn extract_time_range_at(&self, question: &str, now: DateTime<Utc>) -> TimeRange {
        self.extract_at(question, now)
            .into_iter()
            .next()
            .unwrap_or_else(|| TimeRange::default_window(now))
    }
}

impl Extractor for TimeRangeExtractor {
    type Entity = TimeRange;

    fn extract(&self, text: &str) -> Vec<TimeRange> {
        self.extract_at(text, Utc::now())
    }
}
