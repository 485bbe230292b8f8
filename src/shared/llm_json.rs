//! Locating JSON in free-form model output.
//!
//! Models wrap JSON in markdown fences or surround it with prose. Callers get
//! the candidate object text and decide themselves whether it parses.

use serde::de::DeserializeOwned;

/// Return the span from the first `{` to the last `}` of `raw`, after
/// stripping a surrounding ```` ```json ```` fence. `None` when no such span exists.
pub fn json_object_span(raw: &str) -> Option<&str> {
    let trimmed = strip_fence(raw.trim());
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
}

/// Decode the JSON object embedded in `raw` into `T`. Any failure is `None`.
pub fn parse_embedded<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let span = json_object_span(raw)?;
    serde_json::from_str(span).ok()
}

fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Probe {
        summary: String,
    }

    #[test]
    fn test_span_clean() {
        let input = r#"{"summary": "test"}"#;
        assert_eq!(json_object_span(input), Some(input));
    }

    #[test]
    fn test_span_markdown() {
        let input = "```json\n{\"summary\": \"test\"}\n```";
        assert_eq!(json_object_span(input), Some(r#"{"summary": "test"}"#));
    }

    #[test]
    fn test_span_markdown_no_lang() {
        let input = "```\n{\"summary\": \"test\"}\n```";
        assert_eq!(json_object_span(input), Some(r#"{"summary": "test"}"#));
    }

    #[test]
    fn test_span_with_prose() {
        let input = "Here is the result:\n{\"summary\": \"test\", \"n\": {\"a\": 1}}\nHope it helps.";
        assert_eq!(
            json_object_span(input),
            Some(r#"{"summary": "test", "n": {"a": 1}}"#)
        );
    }

    #[test]
    fn test_span_missing() {
        assert_eq!(json_object_span("no json here"), None);
        assert_eq!(json_object_span("} backwards {"), None);
    }

    #[test]
    fn test_parse_embedded_rejects_partial() {
        assert_eq!(
            parse_embedded::<Probe>("ok {\"summary\": \"x\"}"),
            Some(Probe {
                summary: "x".to_string()
            })
        );
        assert_eq!(parse_embedded::<Probe>("{\"title\": \"x\"}"), None);
        assert_eq!(parse_embedded::<Probe>("{\"summary\": \"x\""), None);
    }
}
