//! assistant-router: Personal-assistant query routing with Hexagonal Architecture.
//!
//! A free-text query is classified into a category/action, the handler for that
//! action talks to mail, calendar, chat-export and text-generation backends, and
//! the router always answers with text.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
