//! Mock generator for running without an LLM endpoint.
//!
//! Returns canned text so every route can be exercised offline.

use crate::domain::DomainError;
use crate::ports::GeneratorPort;
use std::time::Duration;
use tracing::info;

/// Mock text generator.
///
/// Echoes a shortened prompt instead of calling a model. Simulates latency
/// with a configurable delay.
pub struct MockGenerator {
    /// Simulated generation delay in milliseconds.
    delay_ms: u64,
}

impl MockGenerator {
    /// Create a new mock generator with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GeneratorPort for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        info!(prompt_len = prompt.len(), "[MOCK] Simulating generation");

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let preview: String = prompt.trim().chars().take(80).collect();
        Ok(format!(
            "[MOCK] No language model is configured (set ASSISTANT_AI_API_KEY). \
             Prompt received: \"{}\"",
            preview
        ))
    }
}
