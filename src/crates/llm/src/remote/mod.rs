//! Remote LLM provider implementations.

pub mod gemini;

pub use gemini::{GeminiClient, GEMINI_BASE_URL};
