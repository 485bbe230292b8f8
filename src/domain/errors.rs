//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Text generation failed: {0}")]
    Generator(String),

    #[error("Mail backend error: {0}")]
    Mail(String),

    #[error("Calendar backend error: {0}")]
    Calendar(String),

    #[error("Chat excerpt error: {0}")]
    ChatExcerpt(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Not configured: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}
