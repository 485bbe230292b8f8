//! Text generation facade. Turns backend failures into plain text.

use crate::domain::DomainError;
use crate::ports::GeneratorPort;
use std::sync::Arc;
use tracing::{debug, warn};

/// Wraps the generation backend. `generate` never fails: a backend error
/// becomes the reply text itself.
#[derive(Clone)]
pub struct TextGenerator {
    backend: Arc<dyn GeneratorPort>,
}

impl TextGenerator {
    pub fn new(backend: Arc<dyn GeneratorPort>) -> Self {
        Self { backend }
    }

    /// Backend result as-is, for callers that must tell failures from answers.
    pub async fn try_generate(&self, prompt: &str) -> Result<String, DomainError> {
        debug!(prompt_len = prompt.len(), "generating");
        self.backend.generate(prompt).await
    }

    pub async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "generation failed");
                format!("Error generating response: {}", e)
            }
        }
    }
}
