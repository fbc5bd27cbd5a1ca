use serde::{Deserialize, Serialize};

// ============= Retrieval Types =============

/// A retrieved passage of text supplied as context to the generator.
///
/// Chunks are produced upstream by a retrieval pipeline and are never
/// mutated here; the generation service only reads them when assembling
/// the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub title: String,
    pub text: String,
    pub similarity_score: f32,
}

impl Chunk {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        similarity_score: f32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            similarity_score,
        }
    }
}

// ============= Generation Types =============

/// The shaped outcome of a generation call.
///
/// `response` is always non-empty on success; when no context chunks were
/// supplied the configured fallback message is returned instead of an
/// error. `response_tokens_per_second` is `None` whenever the provider
/// reports no timing signal (the empty-context fast path never reports
/// one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_tokens_per_second: Option<f64>,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The provider could not be reached or refused the generation call.
    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    /// The provider replied, but without usable choices/content.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
