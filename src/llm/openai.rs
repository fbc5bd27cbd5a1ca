use crate::llm::client::{GenerationParams, LLMClient, RawGeneration};
use crate::types::{AppError, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use std::time::Instant;

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl LLMClient for OpenAiClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<RawGeneration> {
        #[allow(deprecated)]
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(prompt.to_string()),
            )])
            .max_tokens(params.max_tokens)
            .temperature(params.temperature)
            .build()
            .map_err(|e| AppError::GenerationUnavailable(format!("Failed to build request: {}", e)))?;

        let started = Instant::now();
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::GenerationUnavailable(format!("OpenAI API error: {}", e)))?;
        let elapsed = started.elapsed();

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::MalformedResponse("OpenAI reply carried no message content".to_string())
            })?;

        if content.is_empty() {
            return Err(AppError::MalformedResponse(
                "OpenAI reply carried empty message content".to_string(),
            ));
        }

        // The API reports token counts but no timing, so throughput is
        // derived from completion tokens over wall-clock elapsed time.
        let tokens_per_second = response.usage.and_then(|usage| {
            let secs = elapsed.as_secs_f64();
            if usage.completion_tokens > 0 && secs > 0.0 {
                Some(f64::from(usage.completion_tokens) / secs)
            } else {
                None
            }
        });

        tracing::debug!(
            model = %self.model,
            max_tokens = params.max_tokens,
            temperature = params.temperature,
            tokens_per_second = ?tokens_per_second,
            "openai chat completion finished"
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
