//! Query router. Single entry point: classify, dispatch, always answer with text.

use crate::domain::DomainError;
use crate::ports::{GeneratorPort, QueryRequest, QueryResponse};
use crate::usecases::classifier::ActionClassifier;
use crate::usecases::dispatcher::{ActionDispatcher, Backends, DispatchSettings, Reply};
use crate::usecases::extractor::DetailExtractor;
use crate::usecases::text_generator::TextGenerator;
use std::sync::Arc;
use tracing::{error, info};

/// Construction-time options for [`QueryRouter::assemble`].
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub llm_classification: bool,
    pub owner_name: String,
    pub fallback_recipient: String,
    pub chat_excerpt_length: usize,
}

/// Classifier → Dispatcher inside one failure boundary.
///
/// Handles are acquired once and reused across queries. The router issues one
/// backend call at a time; hosts that serve concurrent requests must serialize
/// access to the generation backend themselves.
pub struct QueryRouter {
    classifier: ActionClassifier,
    dispatcher: ActionDispatcher,
}

impl QueryRouter {
    pub fn new(classifier: ActionClassifier, dispatcher: ActionDispatcher) -> Self {
        Self {
            classifier,
            dispatcher,
        }
    }

    /// Wire classifier, extractor and dispatcher around one shared generator.
    pub fn assemble(
        generator: Arc<dyn GeneratorPort>,
        backends: Backends,
        settings: RouterSettings,
    ) -> Self {
        let generator = TextGenerator::new(generator);
        let classifier = if settings.llm_classification {
            ActionClassifier::with_model(generator.clone())
        } else {
            ActionClassifier::keyword_only()
        };
        let extractor = DetailExtractor::new(generator.clone(), settings.fallback_recipient);
        let dispatcher = ActionDispatcher::new(
            generator,
            extractor,
            backends,
            DispatchSettings {
                owner_name: settings.owner_name,
                chat_excerpt_length: settings.chat_excerpt_length,
            },
        );
        Self::new(classifier, dispatcher)
    }

    /// Answer `query`. Never fails; any error becomes an apology string.
    pub async fn process(&self, query: &str) -> String {
        match self.route(query).await {
            Ok(reply) => reply.text,
            Err(e) => {
                error!(error = %e, "query failed");
                format!("Sorry, I encountered an error: {}", e)
            }
        }
    }

    /// Request/response form of [`process`](Self::process).
    pub async fn handle(&self, request: &QueryRequest) -> QueryResponse {
        info!(user_id = ?request.user_id, "handling request");
        QueryResponse::ok(self.process(&request.query).await)
    }

    async fn route(&self, query: &str) -> Result<Reply, DomainError> {
        let intent = self.classifier.classify(query).await;
        info!(
            category = %intent.category,
            action = %intent.action,
            confidence = intent.confidence,
            "classified query"
        );
        self.dispatcher.dispatch(&intent, query).await
    }
}
