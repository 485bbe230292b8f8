//! Action dispatch: one handler per intent category.
//!
//! Every handler answers with a [`Reply`]. External-call failures are caught
//! here and rendered with the failure marker; only archive write errors are
//! allowed to reach the router boundary.

use crate::domain::{format_events, Category, DomainError, EmailRecord, Intent, NewEvent};
use crate::ports::{CalendarPort, ChatExcerptPort, MailArchivePort, MailPort};
use crate::usecases::extractor::DetailExtractor;
use crate::usecases::text_generator::TextGenerator;
use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

/// Prefix for user-facing failure messages.
pub const FAILURE_MARKER: &str = "❌";

pub const NOT_SURE_REPLY: &str =
    "I'm not sure how to help with that. Please try rephrasing your request.";

const INBOX_FETCH_LIMIT: u32 = 5;
const INBOX_SUMMARY_LINES: usize = 3;
const SEARCH_FETCH_LIMIT: u32 = 10;
const SEARCH_SUMMARY_LINES: usize = 5;

const GITA_BANNER: &str = "📖Bhagavad Gita Guidance\n\n";
const BIBLE_BANNER: &str = "Bible Guidance\n\n";

/// Handler result before it is flattened to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// True when the handler called a backend or wrote a file.
    pub side_effect_performed: bool,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            side_effect_performed: false,
        }
    }

    fn after_call(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            side_effect_performed: true,
        }
    }

    fn failed(text: impl std::fmt::Display) -> Self {
        Self::after_call(format!("{} {}", FAILURE_MARKER, text))
    }
}

/// External collaborators used by the handlers.
#[derive(Clone)]
pub struct Backends {
    pub mail: Arc<dyn MailPort>,
    pub archive: Arc<dyn MailArchivePort>,
    pub calendar: Arc<dyn CalendarPort>,
    pub chats: Arc<dyn ChatExcerptPort>,
}

/// Persona and limits for the chat-advice handler.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// The assistant owner's name, fixed in the advice prompt.
    pub owner_name: String,
    pub chat_excerpt_length: usize,
}

/// Last whitespace-delimited token of the query, lower-cased.
///
/// Multi-word contact names cannot be addressed this way.
pub fn contact_from_query(query: &str) -> Option<String> {
    query.split_whitespace().last().map(str::to_lowercase)
}

fn email_lines(records: &[EmailRecord], limit: usize) -> String {
    records
        .iter()
        .take(limit)
        .map(|e| format!("• {} (from {})", e.subject, e.sender))
        .collect::<Vec<_>>()
        .join("\n")
}

fn guidance_prompt(scripture: &str, query: &str) -> String {
    format!(
        r#"You are a wise and compassionate guide who answers life questions using the teachings of the {scripture}.

The user will share a personal or emotional concern. Respond with empathy, clarity, and quotes or summaries from the {scripture} that can help the user reflect and find peace.

User's message:
"""{query}"""

Your response (include relevant verses, chapter numbers if possible, and practical reflection):
"#
    )
}

fn chat_advice_prompt(owner: &str, contact: &str, excerpt: &str) -> String {
    format!(
        r#"Based on the chat of {contact} with me ({owner}), tell me what I should do.
The chat log is semicolon-separated (Date;User;Message):
{excerpt}

I am {owner}, remember that. Give me advice.
Please provide:
- Specific advice on how I should respond
Be empathetic and supportive in your response.
"#
    )
}

/// Routes a classified intent to its handler.
pub struct ActionDispatcher {
    generator: TextGenerator,
    extractor: DetailExtractor,
    backends: Backends,
    settings: DispatchSettings,
}

impl ActionDispatcher {
    pub fn new(
        generator: TextGenerator,
        extractor: DetailExtractor,
        backends: Backends,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            generator,
            extractor,
            backends,
            settings,
        }
    }

    pub async fn dispatch(&self, intent: &Intent, query: &str) -> Result<Reply, DomainError> {
        let reply = match intent.category {
            Category::Calendar => self.handle_calendar(&intent.action, query).await,
            Category::Email => self.handle_email(&intent.action, query).await?,
            Category::Telegram => self.handle_telegram(&intent.action, query).await,
            Category::General => Reply::after_call(self.generator.generate(query).await),
            Category::Gita => {
                self.handle_guidance(&intent.action, query, "Bhagavad Gita", GITA_BANNER)
                    .await
            }
            Category::Bible => {
                self.handle_guidance(&intent.action, query, "Bible", BIBLE_BANNER)
                    .await
            }
            Category::Unknown => Reply::plain(NOT_SURE_REPLY),
        };
        info!(
            category = %intent.category,
            action = %intent.action,
            side_effect = reply.side_effect_performed,
            "dispatched"
        );
        Ok(reply)
    }

    async fn handle_calendar(&self, action: &str, query: &str) -> Reply {
        let calendar = &self.backends.calendar;
        match action {
            "get_today" | "get_yesterday" => {
                let events = if action == "get_today" {
                    calendar.list_today().await
                } else {
                    calendar.list_yesterday().await
                };
                match events {
                    Ok(events) => Reply::after_call(format_events(&events)),
                    Err(e) => {
                        warn!(error = %e, "calendar listing failed");
                        Reply::failed(format!("Failed to fetch calendar events: {}", e))
                    }
                }
            }
            "create" => {
                let details = self.extractor.extract_event(query).await;
                match calendar.create(&NewEvent::from(&details)).await {
                    Ok(created) => {
                        info!(event_id = %created.id, summary = %details.summary, "event created");
                        Reply::after_call(format!(
                            "✅ Event created successfully: {}",
                            details.summary
                        ))
                    }
                    Err(e) => {
                        warn!(error = %e, "event creation failed");
                        Reply::failed(format!("Failed to create event: {}", e))
                    }
                }
            }
            // Deletion needs an event id; the query alone cannot identify one.
            "delete" => Reply::plain(format!(
                "{} Event deletion requires specific event identification. Please provide more details.",
                FAILURE_MARKER
            )),
            _ => Reply::plain(format!("{} Unknown calendar action.", FAILURE_MARKER)),
        }
    }

    async fn handle_email(&self, action: &str, query: &str) -> Result<Reply, DomainError> {
        let reply = match action {
            "get_emails" => {
                let emails = match self.backends.mail.list(INBOX_FETCH_LIMIT, None).await {
                    Ok(emails) => emails,
                    Err(e) => {
                        warn!(error = %e, "inbox fetch failed");
                        return Ok(Reply::failed(format!("Failed to fetch emails: {}", e)));
                    }
                };
                if emails.is_empty() {
                    return Ok(Reply::after_call("📧 No emails found in inbox."));
                }
                let path = self.backends.archive.archive(&emails, None).await?;
                Reply::after_call(format!(
                    "📧 Retrieved {} emails and saved to {}\n\nRecent emails:\n{}",
                    emails.len(),
                    path.display(),
                    email_lines(&emails, INBOX_SUMMARY_LINES)
                ))
            }
            "send" => {
                let details = self.extractor.extract_email(query).await;
                match self
                    .backends
                    .mail
                    .send(&details.to, &details.subject, &details.body)
                    .await
                {
                    Ok(true) => Reply::after_call(format!(
                        "✅ Email sent successfully to {}\nSubject: {}",
                        details.to, details.subject
                    )),
                    Ok(false) => Reply::failed(
                        "Failed to send email. Please check your credentials and try again.",
                    ),
                    Err(e) => {
                        warn!(error = %e, "send failed");
                        Reply::failed(format!("Failed to send email: {}", e))
                    }
                }
            }
            "search" => {
                let search = self.extractor.extract_search_query(query).await;
                if search.is_empty() {
                    return Ok(Reply::plain(format!(
                        "{} Please specify what you want to search for in your emails.",
                        FAILURE_MARKER
                    )));
                }
                let emails = match self
                    .backends
                    .mail
                    .list(SEARCH_FETCH_LIMIT, Some(&search))
                    .await
                {
                    Ok(emails) => emails,
                    Err(e) => {
                        warn!(error = %e, search = %search, "mail search failed");
                        return Ok(Reply::failed(format!("Failed to search emails: {}", e)));
                    }
                };
                if emails.is_empty() {
                    return Ok(Reply::after_call(format!(
                        "🔍 No emails found matching '{}'",
                        search
                    )));
                }
                let filename = format!(
                    "search_results_{}.md",
                    Local::now().format("%Y%m%d_%H%M%S_%3f")
                );
                let path = self
                    .backends
                    .archive
                    .archive(&emails, Some(&filename))
                    .await?;
                Reply::after_call(format!(
                    "🔍 Found {} emails matching '{}' and saved to {}\n\n{}",
                    emails.len(),
                    search,
                    path.display(),
                    email_lines(&emails, SEARCH_SUMMARY_LINES)
                ))
            }
            _ => Reply::plain(format!(
                "{} Unknown email action. Try: 'send email', 'check inbox', or 'search emails'.",
                FAILURE_MARKER
            )),
        };
        Ok(reply)
    }

    async fn handle_telegram(&self, action: &str, query: &str) -> Reply {
        if action != "read_chats" {
            return Reply::plain(format!(
                "{} Unknown telegram action. Try: 'analyze telegram chat with [person_name]'.",
                FAILURE_MARKER
            ));
        }
        let Some(contact) = contact_from_query(query) else {
            return Reply::plain(format!(
                "{} Could not identify the person's name from your request. Please specify who you want to analyze (e.g., 'analyze telegram chat with nisha').",
                FAILURE_MARKER
            ));
        };

        let excerpt = match self
            .backends
            .chats
            .excerpt(&contact, self.settings.chat_excerpt_length)
            .await
        {
            Ok(Some(excerpt)) if !excerpt.trim().is_empty() => excerpt,
            Ok(_) => {
                return Reply::failed(format!(
                    "No chat data found for {}. Please check if the telegram chat file exists.",
                    contact
                ));
            }
            Err(e) => {
                warn!(contact = %contact, error = %e, "chat excerpt failed");
                return Reply::failed(format!("Error processing telegram chat: {}", e));
            }
        };

        let prompt = chat_advice_prompt(&self.settings.owner_name, &contact, &excerpt);
        let advice = self.generator.generate(&prompt).await;
        Reply::after_call(format!(
            "📱 **Telegram Chat Analysis for {}**\n\n{}",
            contact, advice
        ))
    }

    async fn handle_guidance(
        &self,
        action: &str,
        query: &str,
        scripture: &str,
        banner: &str,
    ) -> Reply {
        if action != "guidance" {
            return Reply::plain(format!(
                "{} Unknown {} action. Try asking for spiritual guidance or life advice.",
                FAILURE_MARKER, scripture
            ));
        }
        let guidance = self.generator.generate(&guidance_prompt(scripture, query)).await;
        Reply::after_call(format!("{}{}", banner, guidance))
    }
}
