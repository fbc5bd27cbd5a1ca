//! # ragline - context-grounded generation service
//!
//! Assembles a prompt from a user query plus retrieved document chunks,
//! sends it to a chat-completion endpoint, and returns the generated text
//! alongside a tokens/second throughput metric.
//!
//! ## Overview
//!
//! Two collaborating pieces form the core:
//!
//! - [`generation::compose_prompt`] builds a single prompt embedding the
//!   query and a context section for the supplied chunks.
//! - [`llm::LLMClient`] issues one chat-completion call with `max_tokens`
//!   and `temperature` forwarded unmodified.
//!
//! [`generation::GenerationService`] ties the two together: callers hand
//! it a query, chunks and generation parameters and receive a
//! [`types::GenerationResult`]. When retrieval produced no chunks, a
//! configurable fallback message is returned without invoking the model.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ragline::{GenerationService, LLMClientFactory, Provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let factory = LLMClientFactory::new(Provider::Ollama {
//!         base_url: "http://localhost:11434".to_string(),
//!         model: "llama3.2".to_string(),
//!     });
//!
//!     let service = GenerationService::new(factory.create_default().await?);
//!     let result = service
//!         .generate_response("what materials pair with perovskites?", &chunks, 200, 0.7)
//!         .await?;
//!     println!("{}", result.response);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Description                                  |
//! |----------|----------------------------------------------|
//! | `openai` | OpenAI API and compatible endpoints (default) |
//! | `ollama` | Local Ollama server (default)                 |

pub mod generation;
pub mod llm;
pub mod types;
pub mod utils;

pub use generation::{GenerationPolicy, GenerationService, compose_prompt};
pub use llm::{GenerationParams, LLMClient, LLMClientFactory, Provider, RawGeneration};
pub use types::{AppError, Chunk, GenerationResult, Result};
pub use utils::config::Config;
