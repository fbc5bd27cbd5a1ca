//! LLM client abstraction and provider management
//!
//! This module provides a unified interface for issuing a single
//! chat-completion call against various LLM providers:
//! - **OpenAI**: OpenAI API and compatible endpoints (feature `openai`)
//! - **Ollama**: Local LLM inference via an Ollama server (feature `ollama`)

use crate::types::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded to the provider unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Cap on the number of generated tokens.
    pub max_tokens: u32,
    /// Sampling randomness.
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 200,
            temperature: 0.7,
        }
    }
}

/// Raw outcome of a provider call, before response shaping.
#[derive(Debug, Clone)]
pub struct RawGeneration {
    /// Generated text, verbatim as the provider returned it.
    pub content: String,
    /// Generation throughput, when the provider reports timing.
    pub tokens_per_second: Option<f64>,
}

/// Generic LLM client trait for provider abstraction.
///
/// All providers implement this trait, allowing test doubles and
/// alternative backends to substitute without touching orchestration
/// logic. Implementations make a single inline call; retry and backoff
/// are an explicit caller decision, not layered here.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt.
    ///
    /// `params.max_tokens` and `params.temperature` must reach the
    /// underlying chat-completion call unmodified. Transport failures
    /// surface as [`AppError::GenerationUnavailable`]; a reply without
    /// usable content as [`AppError::MalformedResponse`].
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<RawGeneration>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection.
///
/// Variants are always available so configuration can be parsed without
/// regard to compiled features; `create_client` fails for providers whose
/// feature is not enabled.
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API provider (including Azure OpenAI and compatible APIs).
    OpenAi {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// Ollama local LLM provider.
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Create a client instance for this provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's cargo feature is not enabled
    /// or the client cannot be constructed.
    pub async fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            #[cfg(feature = "openai")]
            Provider::OpenAi {
                api_key,
                api_base,
                model,
            } => Ok(Box::new(super::openai::OpenAiClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            ))),

            #[cfg(not(feature = "openai"))]
            Provider::OpenAi { model, .. } => Err(crate::types::AppError::GenerationUnavailable(format!(
                "OpenAI support not compiled in (requested model '{}'); \
                 rebuild with the `openai` feature",
                model
            ))),

            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone()).await?,
            )),

            #[cfg(not(feature = "ollama"))]
            Provider::Ollama { model, .. } => Err(crate::types::AppError::GenerationUnavailable(format!(
                "Ollama support not compiled in (requested model '{}'); \
                 rebuild with the `ollama` feature",
                model
            ))),
        }
    }

    /// Get a human-readable name for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }

    /// Model identifier this provider is configured for.
    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAi { model, .. } => model,
            Provider::Ollama { model, .. } => model,
        }
    }
}

/// Configuration-based client factory.
///
/// Holds a default provider while allowing per-request provider
/// switching. This is the `get_default_client` seam that orchestration
/// code builds on.
pub struct LLMClientFactory {
    default_provider: Provider,
}

impl LLMClientFactory {
    /// Create a new factory with the specified default provider.
    pub fn new(default_provider: Provider) -> Self {
        Self { default_provider }
    }

    /// Create a client using the default provider.
    pub async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        self.default_provider.create_client().await
    }

    /// Create a client using a specific provider.
    pub async fn create_with_provider(&self, provider: Provider) -> Result<Box<dyn LLMClient>> {
        provider.create_client().await
    }

    /// Get a reference to the default provider.
    pub fn default_provider(&self) -> &Provider {
        &self.default_provider
    }
}
