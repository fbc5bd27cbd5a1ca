use crate::llm::client::{GenerationParams, LLMClient, RawGeneration};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
    models::ModelOptions,
};

pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    pub async fn new(base_url: String, model: String) -> Result<Self> {
        let (host, port) = parse_base_url(&base_url);
        let client = Ollama::new(host, port);

        Ok(Self { client, model })
    }
}

/// Split a base URL into the scheme-qualified host expected by
/// `Ollama::new` and a port, defaulting to 11434.
fn parse_base_url(base_url: &str) -> (String, u16) {
    let (scheme, rest) = match base_url.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("http", base_url),
    };

    let rest = rest.trim_end_matches('/');
    let (host, port) = match rest.rsplit_once(':') {
        Some((host, port)) => (host, port.parse().unwrap_or(11434)),
        None => (rest, 11434),
    };

    (format!("{}://{}", scheme, host), port)
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<RawGeneration> {
        let messages = vec![ChatMessage::user(prompt.to_string())];

        let options = ModelOptions::default()
            .num_predict(params.max_tokens as i32)
            .temperature(params.temperature);

        let request = ChatMessageRequest::new(self.model.clone(), messages).options(options);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::GenerationUnavailable(format!("Ollama error: {}", e)))?;

        let content = response.message.content;
        if content.is_empty() {
            return Err(AppError::MalformedResponse(
                "Ollama reply carried no message content".to_string(),
            ));
        }

        // Ollama reports native timing on the final chat message:
        // eval_count tokens generated over eval_duration nanoseconds.
        let tokens_per_second = response.final_data.and_then(|data| {
            if data.eval_duration > 0 {
                Some(data.eval_count as f64 / (data.eval_duration as f64 / 1_000_000_000.0))
            } else {
                None
            }
        });

        tracing::debug!(
            model = %self.model,
            max_tokens = params.max_tokens,
            temperature = params.temperature,
            tokens_per_second = ?tokens_per_second,
            "ollama chat completion finished"
        );

        Ok(RawGeneration {
            content,
            tokens_per_second,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
