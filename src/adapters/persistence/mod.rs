//! Persistence adapters.

pub mod markdown_archive;

pub use markdown_archive::MarkdownArchive;
