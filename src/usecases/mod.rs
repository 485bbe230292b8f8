//! Application use cases. Orchestrate domain logic via ports.

pub mod classifier;
pub mod dispatcher;
pub mod extractor;
pub mod router;
pub mod text_generator;

#[cfg(test)]
pub(crate) mod fakes;

pub use classifier::{classify_keywords, ActionClassifier};
pub use dispatcher::{ActionDispatcher, Backends, DispatchSettings, Reply};
pub use extractor::DetailExtractor;
pub use router::{QueryRouter, RouterSettings};
pub use text_generator::TextGenerator;
