//! Infrastructure adapters. Implement outbound ports.
//!
//! LLM, Google Workspace, filesystem, Telegram exports, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod google;
pub mod persistence;
pub mod telegram;
pub mod ui;
