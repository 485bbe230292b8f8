//! Classified intent: what the user wants done.

use std::fmt;

/// Capability a query is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Calendar,
    Email,
    Telegram,
    General,
    /// Guidance grounded in the Bhagavad Gita.
    Gita,
    /// Guidance grounded in the Bible.
    Bible,
    Unknown,
}

impl Category {
    /// Map a model-supplied `type` label to a category. Unrecognised labels are `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "calendar" => Self::Calendar,
            "email" | "mail" => Self::Email,
            "telegram" => Self::Telegram,
            "general" => Self::General,
            "geeta" | "gita" => Self::Gita,
            "bible" => Self::Bible,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Email => "email",
            Self::Telegram => "telegram",
            Self::General => "general",
            Self::Gita => "geeta",
            Self::Bible => "bible",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output. Produced fresh per query.
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub category: Category,
    pub action: String,
    pub confidence: f32,
}

impl Intent {
    /// Build an intent; confidence is clamped into `[0, 1]`.
    pub fn new(category: Category, action: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            category,
            action: action.into(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Category::from_label("Calendar"), Category::Calendar);
        assert_eq!(Category::from_label(" gita "), Category::Gita);
        assert_eq!(Category::from_label("geeta"), Category::Gita);
        assert_eq!(Category::from_label("weather"), Category::Unknown);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(Intent::new(Category::General, "chat", 1.7).confidence, 1.0);
        assert_eq!(Intent::new(Category::General, "chat", -0.2).confidence, 0.0);
        assert_eq!(Intent::new(Category::General, "chat", f32::NAN).confidence, 0.0);
    }
}
