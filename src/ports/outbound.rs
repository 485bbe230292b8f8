//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CalendarEvent, DomainError, EmailRecord, NewEvent};
use std::path::PathBuf;

/// Text-generation backend (LLM).
#[async_trait::async_trait]
pub trait GeneratorPort: Send + Sync {
    /// Generate free text for `prompt`. May be slow; runs to completion or fails.
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}

/// Mail backend. List/search and send messages.
#[async_trait::async_trait]
pub trait MailPort: Send + Sync {
    /// Fetch up to `max_results` messages. `query` uses the backend's search
    /// syntax; `None` means the inbox.
    async fn list(
        &self,
        max_results: u32,
        query: Option<&str>,
    ) -> Result<Vec<EmailRecord>, DomainError>;

    /// Send a plain-text message. `Ok(false)` means the backend refused it.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<bool, DomainError>;
}

/// Persists fetched emails to a human-readable archive.
#[async_trait::async_trait]
pub trait MailArchivePort: Send + Sync {
    /// Write `records` and return the archive path. `filename` overrides the
    /// generated name.
    async fn archive(
        &self,
        records: &[EmailRecord],
        filename: Option<&str>,
    ) -> Result<PathBuf, DomainError>;
}

/// Calendar backend.
#[async_trait::async_trait]
pub trait CalendarPort: Send + Sync {
    async fn list_today(&self) -> Result<Vec<CalendarEvent>, DomainError>;

    async fn list_yesterday(&self) -> Result<Vec<CalendarEvent>, DomainError>;

    async fn create(&self, event: &NewEvent) -> Result<CalendarEvent, DomainError>;

    async fn delete(&self, event_id: &str) -> Result<bool, DomainError>;
}

/// Chat-log preprocessor. Produces a bounded excerpt of a conversation.
#[async_trait::async_trait]
pub trait ChatExcerptPort: Send + Sync {
    /// Return at most `max_messages` recent messages with `contact`, or `None`
    /// when no log exists for that name.
    async fn excerpt(
        &self,
        contact: &str,
        max_messages: usize,
    ) -> Result<Option<String>, DomainError>;
}
