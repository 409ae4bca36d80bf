// logrca pipeline - log retrieval from Loki, LLM summarization and root cause analysis

pub mod extractor;
pub mod groq_client;
pub mod llm_client;
pub mod loki_client;
pub mod ollama_client;
pub mod rca;
pub mod summarizer;

pub use extractor::{Extractor, ServiceExtractor, TimeRangeExtractor};
pub use groq_client::GroqClient;
pub use llm_client::{LlmClient, LlmError};
pub use loki_client::{FetchError, LogSource, LokiClient};
pub use ollama_client::OllamaClient;
pub use rca::{RcaEngine, RcaError};
pub use summarizer::{Summarizer, MAX_SUMMARY_LOGS};
