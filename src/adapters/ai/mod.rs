//! AI adapter module. Implements GeneratorPort for LLM integration.
//!
//! Provides OpenAI-compatible adapter and mock adapter for offline use.

pub mod mock_adapter;
pub mod openai_adapter;

pub use mock_adapter::MockGenerator;
pub use openai_adapter::OpenAiGenerator;
