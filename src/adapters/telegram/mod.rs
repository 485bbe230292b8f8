//! Telegram adapter. Reads chat history from Telegram Desktop exports.

pub mod export_excerpts;

pub use export_excerpts::ExportExcerpts;
