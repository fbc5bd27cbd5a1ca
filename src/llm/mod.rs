//! LLM provider clients and abstractions
//!
//! This module provides a unified interface for the single outbound
//! chat-completion call the generation service makes. Provider-specific
//! implementations live behind the [`LLMClient`] trait so orchestration
//! code and tests never depend on a concrete backend.
//!
//! # Supported Providers
//!
//! Enable providers via Cargo features:
//! - `openai` - OpenAI API and compatible endpoints
//! - `ollama` - Local Ollama server
//!
//! # Example
//!
//! ```ignore
//! use ragline::llm::{GenerationParams, LLMClientFactory, Provider};
//!
//! let factory = LLMClientFactory::new(Provider::Ollama {
//!     base_url: "http://localhost:11434".to_string(),
//!     model: "llama3.2".to_string(),
//! });
//!
//! let client = factory.create_default().await?;
//! let raw = client.generate("What is 2+2?", &GenerationParams::default()).await?;
//! println!("{}", raw.content);
//! ```

/// Core LLM client trait, generation parameters and provider factory.
pub mod client;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{GenerationParams, LLMClient, LLMClientFactory, Provider, RawGeneration};
