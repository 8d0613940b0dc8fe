use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A rewritten prompt together with the model's explanation of the changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    pub enhanced_prompt: String,
    pub reasoning: String,
}

/// One stored user interaction cycle: the original prompt, its structured
/// output, and any enhancement attached later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub structured_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement: Option<Enhancement>,
    pub created_at: DateTime<Utc>,
}

impl PromptRecord {
    /// Create a new record with a freshly assigned creation-ordered id.
    pub fn new(
        prompt: impl Into<String>,
        structured_output: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: next_record_id(),
            title: title.into(),
            prompt: prompt.into(),
            structured_output: structured_output.into(),
            enhancement: None,
            created_at: Utc::now(),
        }
    }

    /// Attach an enhancement.
    pub fn with_enhancement(mut self, enhancement: Enhancement) -> Self {
        self.enhancement = Some(enhancement);
        self
    }

    /// Deterministic local title: the first five words of the prompt plus
    /// an ellipsis. Used when the Title operation fails.
    pub fn fallback_title(prompt: &str) -> String {
        let words: Vec<&str> = prompt.split_whitespace().take(5).collect();
        format!("{}...", words.join(" "))
    }
}

/// Generate a unique, lexicographically creation-ordered record id.
///
/// The id is the RFC 3339 UTC timestamp at nanosecond precision with a
/// process-local sequence suffix to disambiguate same-instant calls.
pub fn next_record_id() -> String {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed) % 10_000;
    format!(
        "{}-{:04}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
        seq
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_unique_and_ordered() {
        let a = next_record_id();
        let b = next_record_id();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn new_record_has_no_enhancement() {
        let record = PromptRecord::new("make a list", "{}", "A List");
        assert!(record.enhancement.is_none());
        assert_eq!(record.title, "A List");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn fallback_title_takes_first_five_words() {
        let title = PromptRecord::fallback_title(
            "Create a user profile with a name and email",
        );
        assert_eq!(title, "Create a user profile with...");
    }

    #[test]
    fn fallback_title_handles_short_prompts() {
        assert_eq!(PromptRecord::fallback_title("hello world"), "hello world...");
    }

    #[test]
    fn record_round_trips_with_camel_case_keys() {
        let record = PromptRecord::new("p", "{}", "t").with_enhancement(Enhancement {
            enhanced_prompt: "better p".to_string(),
            reasoning: "clearer".to_string(),
        });
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"structuredOutput\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"enhancedPrompt\""));
        let back: PromptRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
