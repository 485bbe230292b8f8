//! Structured field extraction from free text via the text generator.
//!
//! Model output is untrusted: each method either decodes a complete object
//! or returns the typed fallback. Partial objects are discarded.

use crate::domain::{EmailDetails, EventDetails};
use crate::shared::llm_json::parse_embedded;
use crate::usecases::text_generator::TextGenerator;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Deserialize)]
struct RawEvent {
    summary: String,
    start_time: String,
    end_time: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    attendees: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawEmail {
    to: String,
    subject: String,
    body: String,
}

/// Parse a model timestamp. A trailing `Z` is rewritten to `+00:00`; a
/// zone-less `YYYY-MM-DDTHH:MM:SS` is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(base) => format!("{}+00:00", base),
        None => raw.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_event(response: &str) -> Option<EventDetails> {
    let raw: RawEvent = parse_embedded(response)?;
    if raw.summary.trim().is_empty() {
        return None;
    }
    let start_time = parse_timestamp(&raw.start_time)?;
    let end_time = parse_timestamp(&raw.end_time)?;
    if end_time <= start_time {
        return None;
    }
    Some(EventDetails {
        summary: raw.summary.trim().to_string(),
        start_time,
        end_time,
        description: non_blank(raw.description),
        location: non_blank(raw.location),
        attendees: raw.attendees.unwrap_or_default(),
    })
}

fn parse_email(response: &str) -> Option<EmailDetails> {
    let raw: RawEmail = parse_embedded(response)?;
    if raw.to.trim().is_empty() {
        return None;
    }
    Some(EmailDetails {
        to: raw.to.trim().to_string(),
        subject: raw.subject,
        body: raw.body,
    })
}

fn event_prompt(query: &str, today: NaiveDate) -> String {
    format!(
        r#"Extract event details from this query: "{query}"
Consider the current date to be "{today}". Resolve relative dates such as "tomorrow" or "day after tomorrow" from this date.
For example, if the user says "tomorrow at 10 am", use tomorrow's date at 10:00.
Give every time in ISO format YYYY-MM-DDTHH:MM:SSZ, including the end time.

Return a JSON object with:
- summary: event title
- start_time: datetime in ISO format
- end_time: datetime in ISO format
- description: event description (optional)
- location: event location (optional)
- attendees: list of email addresses (optional)

If any information is missing, use reasonable defaults.
"#,
        today = today.format("%Y-%m-%d")
    )
}

fn email_prompt(query: &str) -> String {
    format!(
        r#"Extract email details from this query: "{query}"

Return a JSON object with:
- to: recipient email address
- subject: email subject
- body: email body content

If any information is missing, use reasonable defaults.
"#
    )
}

fn search_prompt(query: &str) -> String {
    format!(
        r#"Extract a Gmail search query from this user input: "{query}"

Return only the search query that can be used with Gmail's search syntax.
Examples:
- "find emails from john" → "from:john"
- "search for important emails" → "is:important"
- "look for emails about meeting" → "meeting"
- "find unread emails" → "is:unread"

If no clear search terms, return an empty string.
"#
    )
}

/// Pulls event, email and search fields out of a query.
pub struct DetailExtractor {
    generator: TextGenerator,
    fallback_recipient: String,
}

impl DetailExtractor {
    /// `fallback_recipient` is the `to` of the fallback email triple.
    pub fn new(generator: TextGenerator, fallback_recipient: impl Into<String>) -> Self {
        Self {
            generator,
            fallback_recipient: fallback_recipient.into(),
        }
    }

    pub async fn extract_event(&self, query: &str) -> EventDetails {
        self.extract_event_at(query, Utc::now()).await
    }

    /// Like [`extract_event`](Self::extract_event) with an explicit "now",
    /// which anchors relative dates and the fallback window.
    pub async fn extract_event_at(&self, query: &str, now: DateTime<Utc>) -> EventDetails {
        let response = self
            .generator
            .generate(&event_prompt(query, now.date_naive()))
            .await;
        parse_event(&response).unwrap_or_else(|| {
            debug!("event extraction unusable, using fallback");
            EventDetails::fallback(now)
        })
    }

    pub async fn extract_email(&self, query: &str) -> EmailDetails {
        let response = self.generator.generate(&email_prompt(query)).await;
        parse_email(&response).unwrap_or_else(|| {
            debug!("email extraction unusable, using fallback");
            EmailDetails::fallback(&self.fallback_recipient)
        })
    }

    /// Search string in the mail backend's syntax. Empty means "nothing usable".
    pub async fn extract_search_query(&self, query: &str) -> String {
        let response = match self.generator.try_generate(&search_prompt(query)).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "search query extraction failed");
                return String::new();
            }
        };
        response
            .trim()
            .trim_matches(|c| c == '"' || c == '`')
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FALLBACK_EMAIL_BODY, FALLBACK_EMAIL_SUBJECT};
    use crate::usecases::fakes::FakeGenerator;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn build(backend: FakeGenerator) -> (DetailExtractor, Arc<FakeGenerator>) {
        let backend = Arc::new(backend);
        let generator = TextGenerator::new(backend.clone());
        (DetailExtractor::new(generator, "owner@example.com"), backend)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 31, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-08-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-01T10:00:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-01T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-01T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("tomorrow at 10"), None);
    }

    #[tokio::test]
    async fn test_extract_event_parses_model_json() {
        let (extractor, backend) = build(FakeGenerator::answering(
            r#"Here you go:
{"summary": "Dentist", "start_time": "2025-08-01T10:00:00Z", "end_time": "2025-08-01T11:30:00Z",
 "location": "Main St", "attendees": ["a@example.com"]}"#,
        ));
        let details = extractor.extract_event_at("dentist tomorrow at 10", now()).await;
        assert_eq!(details.summary, "Dentist");
        assert_eq!(details.end_time - details.start_time, Duration::minutes(90));
        assert_eq!(details.location.as_deref(), Some("Main St"));
        assert_eq!(details.description, None);
        assert_eq!(details.attendees, vec!["a@example.com".to_string()]);

        let prompt = &backend.prompts()[0];
        assert!(prompt.contains("dentist tomorrow at 10"));
        assert!(prompt.contains("2025-07-31"));
    }

    #[tokio::test]
    async fn test_extract_event_without_json_falls_back() {
        let (extractor, _) = build(FakeGenerator::answering("I could not work that out."));
        let details = extractor.extract_event_at("something", now()).await;
        assert_eq!(details, EventDetails::fallback(now()));
        assert_eq!(details.end_time - details.start_time, Duration::hours(1));
        assert!(!details.summary.is_empty());
    }

    #[tokio::test]
    async fn test_extract_event_rejects_partial_or_inverted() {
        let answers = [
            r#"{"summary": "Dentist", "start_time": "2025-08-01T10:00:00Z"}"#,
            r#"{"summary": "Dentist", "start_time": "soon", "end_time": "later"}"#,
            r#"{"summary": "Dentist", "start_time": "2025-08-01T11:00:00Z", "end_time": "2025-08-01T10:00:00Z"}"#,
            r#"{"summary": "  ", "start_time": "2025-08-01T10:00:00Z", "end_time": "2025-08-01T11:00:00Z"}"#,
        ];
        for answer in answers {
            let (extractor, _) = build(FakeGenerator::answering(answer));
            let details = extractor.extract_event_at("q", now()).await;
            assert_eq!(details, EventDetails::fallback(now()), "answer: {answer}");
        }
    }

    #[tokio::test]
    async fn test_extract_email() {
        let (extractor, _) = build(FakeGenerator::answering(
            r#"```json
{"to": "john@example.com", "subject": "Project", "body": "Status update"}
```"#,
        ));
        let details = extractor.extract_email("mail to john").await;
        assert_eq!(
            details,
            EmailDetails {
                to: "john@example.com".to_string(),
                subject: "Project".to_string(),
                body: "Status update".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_extract_email_fallback_is_fixed() {
        let (extractor, _) = build(
            FakeGenerator::answering("garbage")
                .then(r#"{"to": "john@example.com", "subject": "only two"}"#)
                .then_fail("offline"),
        );
        let expected = EmailDetails {
            to: "owner@example.com".to_string(),
            subject: FALLBACK_EMAIL_SUBJECT.to_string(),
            body: FALLBACK_EMAIL_BODY.to_string(),
        };
        for _ in 0..3 {
            assert_eq!(extractor.extract_email("send a mail").await, expected);
        }
    }

    #[tokio::test]
    async fn test_extract_search_query_trims() {
        let (extractor, _) = build(FakeGenerator::answering("  \"from:john\"\n"));
        assert_eq!(extractor.extract_search_query("find emails from john").await, "from:john");

        let (extractor, _) = build(FakeGenerator::answering("   \n"));
        assert_eq!(extractor.extract_search_query("search emails").await, "");
    }

    #[tokio::test]
    async fn test_extract_search_query_generator_failure_is_empty() {
        let (extractor, _) = build(FakeGenerator::answering("unused").then_fail("timeout"));
        assert_eq!(extractor.extract_search_query("find emails from john").await, "");
    }
}
