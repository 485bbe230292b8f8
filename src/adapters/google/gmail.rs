//! Implements MailPort against the Gmail REST API (v1).

use super::{send, send_json, GoogleSession};
use crate::domain::{DomainError, EmailRecord};
use crate::ports::MailPort;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Deserialize;
use tracing::{debug, info};

const GMAIL_MESSAGES_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages";
const DEFAULT_QUERY: &str = "in:inbox";
const NO_READABLE_CONTENT: &str = "No readable content";

pub struct GmailAdapter {
    session: GoogleSession,
}

impl GmailAdapter {
    pub fn new(session: GoogleSession) -> Self {
        Self { session }
    }

    async fn fetch(&self, id: &str) -> Result<EmailRecord, DomainError> {
        let url = format!("{}/{}", GMAIL_MESSAGES_URL, id);
        let message: GmailMessage = send_json(
            self.session.get(&url).query(&[("format", "full")]),
            DomainError::Mail,
        )
        .await?;
        Ok(message.into_record())
    }
}

#[derive(Deserialize)]
struct MessageList {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Deserialize)]
struct GmailMessage {
    id: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    payload: Payload,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Payload {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    headers: Vec<Header>,
    #[serde(default)]
    body: Option<Body>,
    #[serde(default)]
    parts: Vec<Payload>,
}

#[derive(Deserialize)]
struct Header {
    name: String,
    value: String,
}

#[derive(Deserialize)]
struct Body {
    #[serde(default)]
    data: Option<String>,
}

impl GmailMessage {
    fn into_record(self) -> EmailRecord {
        let header = |name: &str, default: &str| {
            self.payload
                .headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(name))
                .map(|h| h.value.clone())
                .unwrap_or_else(|| default.to_string())
        };
        EmailRecord {
            subject: header("Subject", "No Subject"),
            sender: header("From", "Unknown"),
            date: header("Date", "Unknown"),
            body: self.payload.text_body(),
            snippet: self.snippet,
            id: self.id,
        }
    }
}

impl Payload {
    /// Top-level body if present, else the first text/plain part.
    fn text_body(&self) -> String {
        if let Some(text) = self.body.as_ref().and_then(|b| decode_body(b.data.as_deref())) {
            return text;
        }
        self.parts
            .iter()
            .filter(|p| p.mime_type == "text/plain")
            .find_map(|p| p.body.as_ref().and_then(|b| decode_body(b.data.as_deref())))
            .unwrap_or_else(|| NO_READABLE_CONTENT.to_string())
    }
}

/// Gmail bodies are base64url; padding is not guaranteed.
fn decode_body(data: Option<&str>) -> Option<String> {
    let data = data.filter(|d| !d.is_empty())?;
    let bytes = URL_SAFE_NO_PAD
        .decode(data.trim_end_matches('='))
        .ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Header values must stay on one line; CR or LF would start a new header.
fn header_value(name: &str, value: &str) -> Result<String, DomainError> {
    if value.contains(['\r', '\n']) {
        return Err(DomainError::Mail(format!(
            "line break in {} header rejected",
            name
        )));
    }
    Ok(value.trim().to_string())
}

/// RFC 2047 encoded-word for non-ASCII subjects.
fn encode_subject(subject: &str) -> String {
    if subject.is_ascii() {
        subject.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(subject.as_bytes()))
    }
}

/// Plain-text RFC 822 message, base64url-encoded for the `raw` field.
fn raw_message(to: &str, subject: &str, body: &str) -> Result<String, DomainError> {
    let to = header_value("To", to)?;
    let subject = encode_subject(&header_value("Subject", subject)?);
    let message = format!(
        "To: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/plain; charset=\"utf-8\"\r\n\r\n{}",
        to, subject, body
    );
    Ok(URL_SAFE.encode(message.as_bytes()))
}

#[async_trait::async_trait]
impl MailPort for GmailAdapter {
    async fn list(
        &self,
        max_results: u32,
        query: Option<&str>,
    ) -> Result<Vec<EmailRecord>, DomainError> {
        let q = query.unwrap_or(DEFAULT_QUERY);
        let list: MessageList = send_json(
            self.session
                .get(GMAIL_MESSAGES_URL)
                .query(&[("q", q.to_string()), ("maxResults", max_results.to_string())]),
            DomainError::Mail,
        )
        .await?;

        debug!(count = list.messages.len(), query = %q, "gmail list returned");
        let mut emails = Vec::with_capacity(list.messages.len());
        for message in list.messages {
            emails.push(self.fetch(&message.id).await?);
        }
        info!(count = emails.len(), "fetched emails");
        Ok(emails)
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<bool, DomainError> {
        let payload = serde_json::json!({ "raw": raw_message(to, subject, body)? });
        let url = format!("{}/send", GMAIL_MESSAGES_URL);
        send(self.session.post(&url).json(&payload), DomainError::Mail).await?;
        info!(to = %to, "email sent");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_into_record() {
        let message: GmailMessage = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "snippet": "Lunch?",
            "payload": {
                "mimeType": "multipart/alternative",
                "headers": [
                    {"name": "Subject", "value": "Lunch"},
                    {"name": "From", "value": "Priya <priya@example.com>"}
                ],
                "body": {"size": 0},
                "parts": [
                    {"mimeType": "text/html", "body": {"data": URL_SAFE.encode("<p>hi</p>")}},
                    {"mimeType": "text/plain", "body": {"data": URL_SAFE_NO_PAD.encode("Lunch at noon?")}}
                ]
            }
        }))
        .unwrap();

        let record = message.into_record();
        assert_eq!(record.id, "abc");
        assert_eq!(record.subject, "Lunch");
        assert_eq!(record.sender, "Priya <priya@example.com>");
        assert_eq!(record.date, "Unknown");
        assert_eq!(record.body, "Lunch at noon?");
        assert_eq!(record.snippet, "Lunch?");
    }

    #[test]
    fn test_body_without_text() {
        let message: GmailMessage =
            serde_json::from_value(serde_json::json!({"id": "x", "payload": {}})).unwrap();
        let record = message.into_record();
        assert_eq!(record.subject, "No Subject");
        assert_eq!(record.body, NO_READABLE_CONTENT);
    }

    #[test]
    fn test_raw_message_decodes_to_rfc822() {
        let raw = raw_message("bob@example.com", "Hi", "See you").unwrap();
        let text = String::from_utf8(URL_SAFE.decode(raw).unwrap()).unwrap();
        assert!(text.starts_with("To: bob@example.com\r\nSubject: Hi\r\n"));
        assert!(text.ends_with("\r\n\r\nSee you"));
    }

    #[test]
    fn test_raw_message_rejects_header_line_breaks() {
        let err = raw_message("bob@example.com", "Hi\r\nBcc: someone@example.net", "body")
            .unwrap_err();
        assert!(matches!(err, DomainError::Mail(_)));
        assert!(raw_message("bob@example.com\nCc: x@example.net", "Hi", "body").is_err());
    }

    #[test]
    fn test_non_ascii_subject_is_encoded() {
        let raw = raw_message("bob@example.com", "Grüße", "Hallo").unwrap();
        let text = String::from_utf8(URL_SAFE.decode(raw).unwrap()).unwrap();
        let subject_line = text.lines().find(|l| l.starts_with("Subject: ")).unwrap();
        assert_eq!(subject_line, format!("Subject: =?UTF-8?B?{}?=", STANDARD.encode("Grüße")));
        assert!(text.ends_with("\r\n\r\nHallo"));
    }
}
