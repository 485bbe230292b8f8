//! Cross-cutting helpers: configuration and model-output parsing.

pub mod config;
pub mod llm_json;
