//! Generation service: prompt assembly and response shaping
//!
//! The service composes a single prompt from a user query plus retrieved
//! chunks, issues one chat-completion call through an [`LLMClient`], and
//! shapes the outcome into a [`GenerationResult`]. It holds no state
//! across calls; concurrent callers may share one service freely.

use crate::llm::{GenerationParams, LLMClient};
use crate::types::{Chunk, GenerationResult, Result};

/// Default reply when retrieval produced no context to ground on.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "No relevant information found for the query.";

/// Policy decisions for the generation path.
///
/// The empty-context reply is configurable so callers are not locked to
/// exact wording.
#[derive(Debug, Clone)]
pub struct GenerationPolicy {
    /// Message returned, without invoking the model, when no chunks were
    /// supplied.
    pub fallback_message: String,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl GenerationPolicy {
    pub fn with_fallback_message(fallback_message: impl Into<String>) -> Self {
        Self {
            fallback_message: fallback_message.into(),
        }
    }
}

/// Build the prompt embedding the query and, when present, a context
/// section listing each chunk with its title and id for traceability.
///
/// Deterministic: chunks appear in input order, queries pass through
/// as-is regardless of length. Token-limit enforcement belongs to the
/// provider, not here.
pub fn compose_prompt(query: &str, chunks: &[Chunk]) -> String {
    let mut prompt = String::from(
        "You are a research assistant. Answer the question using only the \
         context passages below. If the context does not contain the answer, \
         say that no relevant information was found.\n\nContext:\n",
    );

    for (i, chunk) in chunks.iter().enumerate() {
        prompt.push_str(&format!(
            "[{}] {} ({})\n{}\n\n",
            i + 1,
            chunk.title,
            chunk.id,
            chunk.text
        ));
    }

    prompt.push_str(&format!("Question: {}\n", query));
    prompt
}

/// Single-shot request/response orchestration over an [`LLMClient`].
///
/// The client is typically obtained from
/// [`LLMClientFactory`](crate::llm::LLMClientFactory); tests substitute a
/// scripted double at the same seam.
pub struct GenerationService {
    client: Box<dyn LLMClient>,
    policy: GenerationPolicy,
}

impl GenerationService {
    /// Create a service with the default fallback policy.
    pub fn new(client: Box<dyn LLMClient>) -> Self {
        Self {
            client,
            policy: GenerationPolicy::default(),
        }
    }

    /// Create a service with an explicit policy.
    pub fn with_policy(client: Box<dyn LLMClient>, policy: GenerationPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    /// Compose the prompt, invoke the model once, and wrap its output.
    ///
    /// An empty chunk slice short-circuits to the policy's fallback
    /// message without invoking the model; the throughput metric is
    /// absent on that path. `max_tokens` and `temperature` are forwarded
    /// to the provider unmodified.
    pub async fn generate_response(
        &self,
        query: &str,
        chunks: &[Chunk],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<GenerationResult> {
        if chunks.is_empty() {
            tracing::debug!(query_len = query.len(), "no context chunks, returning fallback");
            return Ok(GenerationResult {
                response: self.policy.fallback_message.clone(),
                response_tokens_per_second: None,
            });
        }

        let prompt = compose_prompt(query, chunks);
        let params = GenerationParams {
            max_tokens,
            temperature,
        };

        tracing::debug!(
            chunks = chunks.len(),
            max_tokens,
            temperature,
            model = self.client.model_name(),
            "dispatching generation"
        );

        let raw = self.client.generate(&prompt, &params).await?;

        Ok(GenerationResult {
            response: raw.content,
            response_tokens_per_second: raw.tokens_per_second,
        })
    }

    /// Invoke the provider directly with a caller-supplied prompt.
    ///
    /// The prompt passes through unchanged and the provider's text is
    /// surfaced verbatim. Uses default generation parameters.
    pub async fn call_llm(&self, prompt: &str) -> Result<GenerationResult> {
        let raw = self
            .client
            .generate(prompt, &GenerationParams::default())
            .await?;

        Ok(GenerationResult {
            response: raw.content,
            response_tokens_per_second: raw.tokens_per_second,
        })
    }
}
