//! Query classification: free text -> [`Intent`].
//!
//! Keyword groups are checked in a fixed priority order and the first match
//! wins. An optional model pass runs first; its answer is only used when it
//! parses into a complete `{type, action}` object.

use crate::domain::{Category, Intent};
use crate::shared::llm_json::parse_embedded;
use crate::usecases::text_generator::TextGenerator;
use serde::Deserialize;
use tracing::{debug, info};

struct KeywordGroup {
    keywords: &'static [&'static str],
    category: Category,
    action: &'static str,
    confidence: f32,
}

/// Priority order: calendar, email, telegram, scripture. Do not reorder.
const KEYWORD_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["schedule meeting", "create meeting", "add an event"],
        category: Category::Calendar,
        action: "create",
        confidence: 0.8,
    },
    KeywordGroup {
        keywords: &[
            "today events",
            "today's events",
            "what's on today",
            "today's schedule",
            "on my calendar today",
        ],
        category: Category::Calendar,
        action: "get_today",
        confidence: 0.8,
    },
    KeywordGroup {
        keywords: &[
            "yesterday events",
            "yesterday's events",
            "what's on yesterday",
            "yesterday's schedule",
        ],
        category: Category::Calendar,
        action: "get_yesterday",
        confidence: 0.8,
    },
    KeywordGroup {
        keywords: &["delete event", "remove event", "cancel event"],
        category: Category::Calendar,
        action: "delete",
        confidence: 0.8,
    },
    KeywordGroup {
        keywords: &[
            "send a mail",
            "write an email",
            "compose an email",
            "mail to",
            "email to",
        ],
        category: Category::Email,
        action: "send",
        confidence: 0.7,
    },
    KeywordGroup {
        keywords: &[
            "inbox",
            "check mail",
            "get me my 5 recent mails",
            "read email",
            "get emails",
            "show messages",
            "view inbox",
            "check inbox",
            "my emails",
        ],
        category: Category::Email,
        action: "get_emails",
        confidence: 0.8,
    },
    KeywordGroup {
        keywords: &[
            "search emails",
            "find emails",
            "look for emails",
            "filter emails",
            "query emails",
        ],
        category: Category::Email,
        action: "search",
        confidence: 0.7,
    },
    KeywordGroup {
        keywords: &["telegram", "telegram message", "tele", "chat", "chat with"],
        category: Category::Telegram,
        action: "read_chats",
        confidence: 0.8,
    },
    KeywordGroup {
        keywords: &[
            "gita",
            "bhagavad gita",
            "bhagwad gita",
            "geeta",
            "bhagwad geeta",
            "geeta guidance",
        ],
        category: Category::Gita,
        action: "guidance",
        confidence: 0.8,
    },
    KeywordGroup {
        keywords: &[
            "bible",
            "christian guidance",
            "biblical wisdom",
            "gospel",
            "jesus",
        ],
        category: Category::Bible,
        action: "guidance",
        confidence: 0.8,
    },
];

const GENERAL_CONFIDENCE: f32 = 0.6;
const MODEL_DEFAULT_CONFIDENCE: f32 = 0.5;

/// Classify by keyword only. Deterministic; always yields a definite intent.
pub fn classify_keywords(query: &str) -> Intent {
    let query_lower = query.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|group| group.keywords.iter().any(|k| query_lower.contains(k)))
        .map(|group| Intent::new(group.category, group.action, group.confidence))
        .unwrap_or_else(|| Intent::new(Category::General, "chat", GENERAL_CONFIDENCE))
}

#[derive(Deserialize)]
struct ModelIntent {
    #[serde(rename = "type")]
    kind: String,
    action: String,
    #[serde(default)]
    confidence: Option<serde_json::Value>,
}

/// Parse a model answer. Both `type` and `action` must be present strings;
/// a non-numeric `confidence` is ignored.
fn parse_model_intent(raw: &str) -> Option<Intent> {
    let parsed: ModelIntent = parse_embedded(raw)?;
    let action = parsed.action.trim();
    if parsed.kind.trim().is_empty() || action.is_empty() {
        return None;
    }
    Some(Intent::new(
        Category::from_label(&parsed.kind),
        action,
        parsed
            .confidence
            .as_ref()
            .and_then(serde_json::Value::as_f64)
            .map_or(MODEL_DEFAULT_CONFIDENCE, |c| c as f32),
    ))
}

fn classification_prompt(query: &str) -> String {
    format!(
        r#"Analyze this user query and determine the intended action: "{query}"

Return a JSON object with:
- type: "calendar", "email", "telegram", "geeta", "bible", or "general"
- action: specific action to perform
- confidence: confidence level (0-1)

For calendar actions:
- "create" - schedule, book, create, add event/meeting/appointment
- "get_today" - today's schedule, today's events, what's on today
- "get_yesterday" - yesterday's events, past events
- "delete" - delete, remove, cancel event

For email actions:
- "send" - send email, write email, compose, mail to
- "get_emails" - check inbox, read emails, show messages, get mail
- "search" - search emails, find emails, look for

For telegram:
- "read_chats" - analyze or get advice about a chat with someone

For geeta and bible:
- "guidance" - spiritual guidance or life advice from that scripture

For general:
- "chat" - general conversation, questions, help

Examples:
"Schedule a meeting tomorrow at 3pm" → {{"type": "calendar", "action": "create", "confidence": 0.9}}
"What's on my calendar today?" → {{"type": "calendar", "action": "get_today", "confidence": 0.9}}
"Send an email to john@example.com" → {{"type": "email", "action": "send", "confidence": 0.9}}
"Check my inbox" → {{"type": "email", "action": "get_emails", "confidence": 0.9}}
"How are you?" → {{"type": "general", "action": "chat", "confidence": 0.8}}
"#
    )
}

/// Maps a query to an [`Intent`].
pub struct ActionClassifier {
    model: Option<TextGenerator>,
}

impl ActionClassifier {
    /// Keyword matching only.
    pub fn keyword_only() -> Self {
        Self { model: None }
    }

    /// Ask `model` first, keywords when its answer is unusable.
    pub fn with_model(model: TextGenerator) -> Self {
        Self { model: Some(model) }
    }

    pub async fn classify(&self, query: &str) -> Intent {
        if let Some(model) = &self.model {
            let raw = model.generate(&classification_prompt(query)).await;
            match parse_model_intent(&raw) {
                Some(intent) => {
                    info!(category = %intent.category, action = %intent.action, "model classification");
                    return intent;
                }
                None => debug!("model classification unusable, using keywords"),
            }
        }
        classify_keywords(query)
    }
}
