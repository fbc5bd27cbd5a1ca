//! Generation service tests against a scripted client double
//!
//! These tests drive `GenerationService` through the trait seam with a
//! scripted `LLMClient`, verifying prompt assembly, parameter
//! pass-through, the empty-context fallback and error propagation.

use async_trait::async_trait;
use ragline::{
    AppError, Chunk, GenerationParams, GenerationPolicy, GenerationService, LLMClient,
    RawGeneration, Result,
};
use std::sync::{Arc, Mutex};

// ============= Test Doubles =============

/// Records every call and replies with a fixed generation.
struct ScriptedClient {
    content: String,
    tokens_per_second: Option<f64>,
    calls: Arc<Mutex<Vec<(String, GenerationParams)>>>,
}

impl ScriptedClient {
    fn new(content: &str, tokens_per_second: Option<f64>) -> (Self, Arc<Mutex<Vec<(String, GenerationParams)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                content: content.to_string(),
                tokens_per_second,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl LLMClient for ScriptedClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<RawGeneration> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *params));

        Ok(RawGeneration {
            content: self.content.clone(),
            tokens_per_second: self.tokens_per_second,
        })
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

enum Failure {
    Unavailable,
    Malformed,
}

/// Always fails with the configured error kind.
struct FailingClient {
    failure: Failure,
}

#[async_trait]
impl LLMClient for FailingClient {
    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<RawGeneration> {
        Err(match self.failure {
            Failure::Unavailable => {
                AppError::GenerationUnavailable("connection refused".to_string())
            }
            Failure::Malformed => AppError::MalformedResponse("empty choices".to_string()),
        })
    }

    fn model_name(&self) -> &str {
        "failing-model"
    }
}

// ============= Fixtures =============

fn mock_query() -> &'static str {
    "what materials are often used along with perovskites?"
}

fn mock_chunks() -> Vec<Chunk> {
    vec![
        Chunk::new(
            "doc-1",
            "Perovskite Solar Cells",
            "Recent research pairs perovskites with silicon in tandem solar cells, \
             showing significant efficiency improvements.",
            0.91,
        ),
        Chunk::new(
            "doc-2",
            "Material Properties",
            "The unique optoelectronic properties of perovskite materials enable \
             better device performance.",
            0.85,
        ),
    ]
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ragline=debug")
        .with_test_writer()
        .try_init();
}

// ============= generate_response =============

#[tokio::test]
async fn test_generate_response_basic() {
    init_tracing();

    let (client, calls) = ScriptedClient::new(
        "Here is information about perovskites: They are used in solar cells.",
        Some(100.0),
    );
    let service = GenerationService::new(Box::new(client));

    let result = service
        .generate_response(mock_query(), &mock_chunks(), 200, 0.7)
        .await
        .unwrap();

    assert!(result.response.to_lowercase().contains("perovskites"));
    assert!(result.response.to_lowercase().contains("solar cells"));
    assert_eq!(result.response_tokens_per_second, Some(100.0));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);

    // Prompt embeds the query and the supplied context.
    let (prompt, params) = &calls[0];
    assert!(prompt.contains(mock_query()));
    assert!(prompt.contains("tandem solar cells"));
    assert!(prompt.contains("Perovskite Solar Cells (doc-1)"));
    assert_eq!(params.max_tokens, 200);
    assert!((params.temperature - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_generate_response_empty_chunks() {
    let (client, calls) = ScriptedClient::new("should never be returned", Some(50.0));
    let service = GenerationService::new(Box::new(client));

    let result = service
        .generate_response(mock_query(), &[], 200, 0.7)
        .await
        .unwrap();

    assert!(result.response.to_lowercase().contains("no relevant information"));
    assert_eq!(result.response_tokens_per_second, None);

    // The model must not be invoked on the empty-context path.
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_response_empty_chunks_custom_policy() {
    let (client, _calls) = ScriptedClient::new("unused", None);
    let service = GenerationService::with_policy(
        Box::new(client),
        GenerationPolicy::with_fallback_message("Nothing indexed for this workspace yet."),
    );

    let result = service
        .generate_response(mock_query(), &[], 200, 0.7)
        .await
        .unwrap();

    assert_eq!(result.response, "Nothing indexed for this workspace yet.");
    assert_eq!(result.response_tokens_per_second, None);
}

#[tokio::test]
async fn test_generate_response_high_temperature() {
    let (client, calls) = ScriptedClient::new(
        "Perovskites might revolutionize solar cells with surprising applications.",
        Some(150.0),
    );
    let service = GenerationService::new(Box::new(client));

    let result = service
        .generate_response(mock_query(), &mock_chunks(), 150, 1.5)
        .await
        .unwrap();

    // A well-behaved provider honors max_tokens; the client's obligation
    // is forwarding the parameters unmodified.
    assert!(result.response.split_whitespace().count() <= 150);

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].1.max_tokens, 150);
    assert!((calls[0].1.temperature - 1.5).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_generate_response_long_query() {
    let long_query = "Perovskites ".repeat(100);

    let (client, calls) = ScriptedClient::new(
        "Perovskites are materials used in solar cells.",
        Some(150.0),
    );
    let service = GenerationService::new(Box::new(client));

    let result = service
        .generate_response(&long_query, &mock_chunks(), 150, 0.7)
        .await
        .unwrap();

    assert!(result.response.contains("Perovskites"));
    assert!(result.response.split_whitespace().count() <= 150);

    // The query passes through as-is, no truncation.
    let calls = calls.lock().unwrap();
    assert!(calls[0].0.contains(long_query.trim_end()));
}

#[tokio::test]
async fn test_generate_response_with_multiple_chunks() {
    let (client, calls) = ScriptedClient::new(
        "Recent research shows significant efficiency improvements in perovskite \
         solar cells, with unique properties enabling better performance.",
        Some(200.0),
    );
    let service = GenerationService::new(Box::new(client));

    let result = service
        .generate_response(mock_query(), &mock_chunks(), 150, 0.7)
        .await
        .unwrap();

    assert!(result.response.to_lowercase().contains("efficiency"));
    assert!(result.response.to_lowercase().contains("perovskite"));
    assert!(result.response.to_lowercase().contains("properties"));

    // Both chunks appear in the prompt, in input order.
    let calls = calls.lock().unwrap();
    let prompt = &calls[0].0;
    let first = prompt.find("tandem solar cells").unwrap();
    let second = prompt.find("optoelectronic properties").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn test_generate_response_concurrent_callers() {
    let (client, calls) = ScriptedClient::new("Perovskites pair with silicon.", Some(90.0));
    let service = Arc::new(GenerationService::new(Box::new(client)));

    let chunks = mock_chunks();
    let (a, b) = tokio::join!(
        service.generate_response(mock_query(), &chunks, 200, 0.7),
        service.generate_response(mock_query(), &chunks, 200, 0.7),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(calls.lock().unwrap().len(), 2);
}

// ============= call_llm =============

#[tokio::test]
async fn test_call_llm_passes_prompt_through() {
    let (client, calls) = ScriptedClient::new("Test response", Some(42.0));
    let service = GenerationService::new(Box::new(client));

    let result = service.call_llm("Test prompt").await.unwrap();

    assert_eq!(result.response, "Test response");
    assert_eq!(result.response_tokens_per_second, Some(42.0));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Test prompt");
    assert_eq!(calls[0].1, GenerationParams::default());
}

// ============= Error propagation =============

#[tokio::test]
async fn test_provider_failure_propagates_as_unavailable() {
    let service = GenerationService::new(Box::new(FailingClient {
        failure: Failure::Unavailable,
    }));

    let err = service
        .generate_response(mock_query(), &mock_chunks(), 200, 0.7)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::GenerationUnavailable(_)));
}

#[tokio::test]
async fn test_malformed_reply_propagates() {
    let service = GenerationService::new(Box::new(FailingClient {
        failure: Failure::Malformed,
    }));

    let err = service.call_llm("Test prompt").await.unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)));
}
