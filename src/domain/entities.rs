//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here; adapters map backend payloads into these.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Summary used when event extraction fails.
pub const FALLBACK_EVENT_SUMMARY: &str = "New Event";
const FALLBACK_EVENT_DESCRIPTION: &str = "Event created from user request";

pub const FALLBACK_EMAIL_SUBJECT: &str = "New Email";
pub const FALLBACK_EMAIL_BODY: &str = "Email content from user request";

/// Event fields recovered from a free-text request.
///
/// Invariant: `end_time > start_time`. Built either from a fully parsed model
/// answer or from [`EventDetails::fallback`], never a mix of both.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub summary: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
}

impl EventDetails {
    /// Default event one hour from `now`, lasting one hour.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            summary: FALLBACK_EVENT_SUMMARY.to_string(),
            start_time: now + Duration::hours(1),
            end_time: now + Duration::hours(2),
            description: Some(FALLBACK_EVENT_DESCRIPTION.to_string()),
            location: None,
            attendees: Vec::new(),
        }
    }
}

/// Recipient, subject and body for an outgoing message. All three are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDetails {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailDetails {
    pub fn fallback(to: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: FALLBACK_EMAIL_SUBJECT.to_string(),
            body: FALLBACK_EMAIL_BODY.to_string(),
        }
    }
}

/// A message fetched from the mail backend. Read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: String,
    pub subject: String,
    pub sender: String,
    pub date: String,
    pub body: String,
    pub snippet: String,
}

/// An event as returned by the calendar backend.
///
/// `start`/`end` are kept as the backend renders them: an RFC 3339 timestamp,
/// or a bare date for all-day events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub start: String,
    pub end: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub attendees: Vec<String>,
}

/// Create request sent to the calendar backend.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub location: String,
    pub attendees: Vec<String>,
}

impl From<&EventDetails> for NewEvent {
    fn from(details: &EventDetails) -> Self {
        Self {
            summary: details.summary.clone(),
            start: details.start_time,
            end: details.end_time,
            description: details.description.clone().unwrap_or_default(),
            location: details.location.clone().unwrap_or_default(),
            attendees: details.attendees.clone(),
        }
    }
}

/// Text rendering of a calendar listing.
pub fn format_events(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }

    let mut out = String::from("📅 **Calendar Events:**\n\n");
    for event in events {
        out.push_str(&format!("**{}**\n", event.summary));
        out.push_str(&format!("📅 {} - {}\n", event.start, event.end));
        if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
            out.push_str(&format!("📍 {}\n", location));
        }
        if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("📝 {}\n", description));
        }
        if !event.attendees.is_empty() {
            out.push_str(&format!("👥 Attendees: {}\n", event.attendees.join(", ")));
        }
        out.push('\n');
    }
    out
}
