//! Environment configuration for the API server

use std::sync::Arc;

use logrca_core::KNOWN_SERVICES;
use logrca_rag::loki_client::DEFAULT_LOKI_URL;
use logrca_rag::ollama_client::DEFAULT_OLLAMA_URL;
use logrca_rag::{GroqClient, LlmClient, OllamaClient};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SUMMARY_MODEL: &str = "mistral";
pub const DEFAULT_RCA_MODEL: &str = "llama2";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown LLM_PROVIDER '{0}' (expected 'ollama' or 'groq')")]
    UnknownProvider(String),

    #[error("GROQ_API_KEY must be set when LLM_PROVIDER=groq")]
    MissingGroqKey,
}

/// LLM Provider selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LlmProvider {
    #[default]
    Ollama,
    Groq,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub loki_url: String,
    pub provider: LlmProvider,
    pub ollama_url: String,
    pub groq_api_key: Option<String>,
    pub summary_model: String,
    pub rca_model: String,
    pub known_services: Vec<String>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let provider = match get_or("LLM_PROVIDER", "ollama").to_lowercase().as_str() {
            "ollama" => LlmProvider::Ollama,
            "groq" => LlmProvider::Groq,
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        let groq_api_key = get("GROQ_API_KEY");
        if provider == LlmProvider::Groq && groq_api_key.is_none() {
            return Err(ConfigError::MissingGroqKey);
        }

        // a list with no usable names falls back to the built-in registry
        let known_services: Vec<String> = get("KNOWN_SERVICES")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|services| !services.is_empty())
            .unwrap_or_else(|| KNOWN_SERVICES.iter().map(|s| s.to_string()).collect());

        Ok(Self {
            bind_addr: get_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            loki_url: get_or("LOKI_URL", DEFAULT_LOKI_URL),
            provider,
            ollama_url: get_or("OLLAMA_URL", DEFAULT_OLLAMA_URL),
            groq_api_key,
            summary_model: get_or("SUMMARY_MODEL", DEFAULT_SUMMARY_MODEL),
            rca_model: get_or("RCA_MODEL", DEFAULT_RCA_MODEL),
            known_services,
        })
    }

    /// Completion client for one caller's model
    pub fn llm_client(&self, model: &str) -> Result<Arc<dyn LlmClient>, ConfigError> {
        match self.provider {
            LlmProvider::Ollama => Ok(Arc::new(OllamaClient::new(&self.ollama_url, model))),
            LlmProvider::Groq => {
                let key = self.groq_api_key.as_ref().ok_or(ConfigError::MissingGroqKey)?;
                Ok(Arc::new(GroqClient::new(key, model)))
            }
        }
    }
}
