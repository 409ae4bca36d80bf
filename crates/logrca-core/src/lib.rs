//! Core types for the log summarization and RCA service
//! shared between the pipeline crate, the API and the CLI.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// SERVICE REGISTRY //

/// Services the RCA extractor knows about, in match order
pub const KNOWN_SERVICES: [&str; 3] = ["checkout-service", "payment-service", "inventory-service"];

/// Upper bound on lines requested from the log store per query
pub const MAX_QUERY_LIMIT: u32 = 1000;

/// Span of the default RCA window
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

// LOG ENTRY //

/// One log line's message content, as returned by the log store
pub type LogEntry = String;

// LOG QUERY //

/// A ranged query for a single service's log stream.
/// Omitted bounds are left to the log store's own default range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub service: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    limit: u32,
}

impl LogQuery {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            start: None,
            end: None,
            limit: MAX_QUERY_LIMIT,
        }
    }

    pub fn with_start(mut self, start: Option<DateTime<Utc>>) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: Option<DateTime<Utc>>) -> Self {
        self.end = end;
        self
    }

    pub fn with_range(self, range: &TimeRange) -> Self {
        self.with_start(Some(range.start)).with_end(Some(range.end))
    }

    // clamped to MAX_QUERY_LIMIT
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.min(MAX_QUERY_LIMIT);
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

// TIME RANGE //

/// Closed time window, always `start < end`.
/// Serializes both bounds as RFC 3339 strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Window of `hours` ending at `end`; at least one hour wide
    pub fn ending_at(end: DateTime<Utc>, hours: i64) -> Self {
        let hours = hours.max(1);
        Self {
            start: end - Duration::hours(hours),
            end,
        }
    }

    /// The fallback window: 24 hours ending at `now`
    pub fn default_window(now: DateTime<Utc>) -> Self {
        Self::ending_at(now, DEFAULT_WINDOW_HOURS)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

// RCA REQUEST / REPORT //

/// Free-text root cause question
#[derive(Debug, Clone, Deserialize)]
pub struct RcaRequest {
    pub question: String,
}

/// Successful root cause analysis, built per request and never stored
#[derive(Debug, Clone, Serialize)]
pub struct RcaReport {
    pub service: String,
    pub time_range: TimeRange,
    pub analysis: String,
}
