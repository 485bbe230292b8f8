//! Implements MailArchivePort. Writes fetched emails as a markdown file under one directory.
//! Default file name: emails_{YYYYmmdd_HHMMSS}.md. Existing files with the same name are overwritten.

use crate::domain::{DomainError, EmailRecord};
use crate::ports::MailArchivePort;
use chrono::Local;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// File-system email archive. One markdown document per call.
pub struct MarkdownArchive {
    base_dir: PathBuf,
}

impl MarkdownArchive {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

/// Render the archive document.
fn render(emails: &[EmailRecord], generated_on: &str) -> String {
    let mut doc = String::from("# Email Archive\n\n");
    let _ = write!(doc, "Generated on: {}\n\n", generated_on);

    for (i, email) in emails.iter().enumerate() {
        let _ = write!(
            doc,
            "## Email {}\n\n**Subject:** {}\n\n**From:** {}\n\n**Date:** {}\n\n**Snippet:** {}\n\n**Body:**\n\n{}\n\n---\n\n",
            i + 1,
            email.subject,
            email.sender,
            email.date,
            email.snippet,
            email.body
        );
    }
    doc
}

#[async_trait::async_trait]
impl MailArchivePort for MarkdownArchive {
    async fn archive(
        &self,
        emails: &[EmailRecord],
        filename: Option<&str>,
    ) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| DomainError::Archive(e.to_string()))?;

        let now = Local::now();
        let name = match filename {
            Some(name) => name.to_string(),
            None => format!("emails_{}.md", now.format("%Y%m%d_%H%M%S")),
        };
        let path = self.base_dir.join(name);

        let doc = render(emails, &now.format("%Y-%m-%d %H:%M:%S").to_string());
        fs::write(&path, doc)
            .await
            .map_err(|e| DomainError::Archive(format!("{}: {}", path.display(), e)))?;

        info!(count = emails.len(), path = %path.display(), "archived emails");
        Ok(path)
    }
}
