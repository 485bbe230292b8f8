//! Implements ChatExcerptPort over Telegram Desktop JSON exports.
//!
//! One export per contact: {export_dir}/{contact}.json ("Export chat history" → JSON).
//! The excerpt is the last N text messages as semicolon CSV (`Date;User;Message`),
//! compact enough to paste into a prompt.

use crate::domain::DomainError;
use crate::ports::ChatExcerptPort;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub struct ExportExcerpts {
    export_dir: PathBuf,
}

impl ExportExcerpts {
    pub fn new(export_dir: impl AsRef<Path>) -> Self {
        Self {
            export_dir: export_dir.as_ref().to_path_buf(),
        }
    }

    fn export_path(&self, contact: &str) -> Result<PathBuf, DomainError> {
        let valid = !contact.is_empty()
            && contact
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !contact.starts_with('.');
        if !valid {
            return Err(DomainError::ChatExcerpt(format!(
                "invalid contact name '{}'",
                contact
            )));
        }
        Ok(self.export_dir.join(format!("{}.json", contact)))
    }
}

#[derive(Deserialize)]
struct ChatExport {
    #[serde(default)]
    messages: Vec<ExportMessage>,
}

#[derive(Deserialize)]
struct ExportMessage {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    text: MessageText,
}

/// Plain messages export `text` as a string; formatted ones as an array of
/// strings and `{type, text}` entities.
#[derive(Deserialize)]
#[serde(untagged)]
enum MessageText {
    Plain(String),
    Rich(Vec<TextPiece>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextPiece {
    Plain(String),
    Entity { text: String },
}

impl Default for MessageText {
    fn default() -> Self {
        MessageText::Plain(String::new())
    }
}

impl MessageText {
    fn flatten(&self) -> String {
        match self {
            MessageText::Plain(s) => s.clone(),
            MessageText::Rich(pieces) => pieces
                .iter()
                .map(|p| match p {
                    TextPiece::Plain(s) => s.as_str(),
                    TextPiece::Entity { text } => text.as_str(),
                })
                .collect(),
        }
    }
}

/// Rows of (date, user, text) for the last `max_messages` non-empty text messages.
fn last_text_rows(export: &ChatExport, max_messages: usize) -> Vec<[String; 3]> {
    let mut rows: Vec<[String; 3]> = export
        .messages
        .iter()
        .filter(|m| m.kind == "message")
        .filter_map(|m| {
            let text = m.text.flatten();
            if text.trim().is_empty() {
                return None;
            }
            let date: String = m.date.replace('T', " ").chars().take(16).collect();
            let user = m.from.clone().unwrap_or_else(|| "unknown".to_string());
            Some([date, user, text])
        })
        .collect();
    let skip = rows.len().saturating_sub(max_messages);
    rows.drain(..skip);
    rows
}

/// Semicolon CSV with header. Newlines inside messages are flattened to spaces.
fn rows_to_csv(rows: &[[String; 3]]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(["Date", "User", "Message"])?;
    for [date, user, text] in rows {
        let clean_text = text.replace('\n', " ").replace('\r', "");
        wtr.write_record([date, user, &clean_text])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[async_trait::async_trait]
impl ChatExcerptPort for ExportExcerpts {
    async fn excerpt(
        &self,
        contact: &str,
        max_messages: usize,
    ) -> Result<Option<String>, DomainError> {
        let path = self.export_path(contact)?;
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no chat export");
                return Ok(None);
            }
            Err(e) => return Err(DomainError::ChatExcerpt(e.to_string())),
        };

        let export: ChatExport = serde_json::from_slice(&raw).map_err(|e| {
            DomainError::ChatExcerpt(format!("{}: {}", path.display(), e))
        })?;

        let rows = last_text_rows(&export, max_messages);
        if rows.is_empty() {
            return Ok(None);
        }
        let csv = rows_to_csv(&rows).map_err(|e| DomainError::ChatExcerpt(e.to_string()))?;
        info!(contact = %contact, rows = rows.len(), "chat excerpt ready");
        Ok(Some(csv))
    }
}
