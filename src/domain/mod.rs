//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod intent;

pub use entities::{
    format_events, CalendarEvent, EmailDetails, EmailRecord, EventDetails, NewEvent,
};
pub use errors::DomainError;
pub use intent::{Category, Intent};
