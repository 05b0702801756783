//! Chat-completion client for OpenRouter-compatible LLM APIs.
//!
//! The thesis wizard treats the language model as an opaque collaborator:
//! it sends a prompt and reads back text. This crate owns the HTTP details,
//! including bounded retry with exponential backoff on rate limits and
//! server errors.

pub mod client;
pub mod error;
pub mod types;

pub use client::{OpenRouterClient, RetryPolicy};
pub use error::{GenAiError, GenAiResult};
pub use types::{ChatMessage, ResponseFormat, Role};

/// Default OpenRouter API base URL
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default chat model used for thesis generation and coaching feedback
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-pro";
