use std::sync::Arc;

use logrca_rag::{LlmClient, LogSource, LokiClient, RcaEngine, ServiceExtractor, Summarizer};
use tracing::info;

use crate::config::{ApiConfig, ConfigError};

// App state - shared across handlers, immutable after startup
pub struct AppState {
    pub logs: Arc<dyn LogSource>,
    pub summarizer: Summarizer,
    pub rca_engine: RcaEngine,
}

impl AppState {
    pub fn new(
        logs: Arc<dyn LogSource>,
        summary_llm: Arc<dyn LlmClient>,
        rca_llm: Arc<dyn LlmClient>,
        services: ServiceExtractor,
    ) -> Self {
        Self {
            summarizer: Summarizer::new(summary_llm),
            rca_engine: RcaEngine::new(logs.clone(), rca_llm).with_service_extractor(services),
            logs,
        }
    }

    /// Wire the real Loki and LLM clients from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let loki = LokiClient::new(&config.loki_url);
        info!(loki = %loki.base_url(), "Loki client ready");

        let summary_llm = config.llm_client(&config.summary_model)?;
        let rca_llm = config.llm_client(&config.rca_model)?;
        info!(
            provider = summary_llm.provider(),
            summary_model = summary_llm.model(),
            rca_model = rca_llm.model(),
            "LLM clients ready"
        );

        let services = ServiceExtractor::new(config.known_services.iter().cloned());
        info!(services = ?services.services(), "Service registry loaded");

        Ok(Self::new(Arc::new(loki), summary_llm, rca_llm, services))
    }
}
