use crate::llm::Provider;
use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LLMConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    /// Which provider to use: "openai" or "ollama".
    pub provider: String,
    pub model: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub ollama_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    pub fallback_message: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "ollama".to_string()),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            },
            generation: GenerationConfig {
                max_tokens: env::var("GENERATION_MAX_TOKENS")
                    .unwrap_or_else(|_| "200".to_string())
                    .parse()
                    .map_err(|e| AppError::Config(format!("GENERATION_MAX_TOKENS: {}", e)))?,
                temperature: env::var("GENERATION_TEMPERATURE")
                    .unwrap_or_else(|_| "0.7".to_string())
                    .parse()
                    .map_err(|e| AppError::Config(format!("GENERATION_TEMPERATURE: {}", e)))?,
                fallback_message: env::var("GENERATION_FALLBACK_MESSAGE").unwrap_or_else(|_| {
                    crate::generation::DEFAULT_FALLBACK_MESSAGE.to_string()
                }),
            },
        })
    }

    /// Map the loaded settings onto a runtime provider selection.
    pub fn provider(&self) -> Result<Provider> {
        match self.llm.provider.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi {
                api_key: self.llm.openai_api_key.clone().ok_or_else(|| {
                    AppError::Config("OPENAI_API_KEY is required for the openai provider".to_string())
                })?,
                api_base: self.llm.openai_api_base.clone(),
                model: self.llm.model.clone(),
            }),
            "ollama" => Ok(Provider::Ollama {
                base_url: self.llm.ollama_url.clone(),
                model: self.llm.model.clone(),
            }),
            other => Err(AppError::InvalidInput(format!(
                "Unknown LLM provider: {}. Use: openai, ollama",
                other
            ))),
        }
    }
}
