//! Maps service failures to a small taxonomy of user-facing messages.
//!
//! Pure and total: every `ServiceFailure` classifies to exactly one
//! category, evaluated in precedence order, and classification never fails.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::error::ServiceFailure;

/// Fallback wait when a quota failure carries no usable delay.
const DEFAULT_RETRY_SECONDS: f64 = 60.0;

/// Catch-all wrapper texts the operations layer may attach to a failure.
/// A message equal to one of these carries no extra information, so the
/// Unknown category falls back to its generic text instead.
const GENERIC_WRAPPERS: &[&str] = &[
    "Failed to parse prompt. Please try again.",
    "Failed to enhance prompt. Please try again.",
    "Failed to generate title. Please try again.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidCredentials,
    QuotaExceeded,
    Unauthorized,
    OtherBadRequest,
    Unknown,
}

/// A classified failure, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub category: ErrorCategory,
    pub message: String,
    /// Whole-second wait estimate, present only for quota failures.
    pub retry_after_seconds: Option<u64>,
}

impl Classified {
    /// Whole-minute rendering of the wait estimate, rounded up.
    pub fn retry_after_minutes(&self) -> Option<u64> {
        self.retry_after_seconds.map(|secs| secs.div_ceil(60).max(1))
    }

    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after_seconds.map(Duration::from_secs)
    }
}

/// Classify a service failure into a user-facing category and message.
///
/// First match wins: InvalidCredentials, QuotaExceeded, Unauthorized,
/// OtherBadRequest, Unknown.
pub fn classify(failure: &ServiceFailure) -> Classified {
    let message = failure.message.as_deref().unwrap_or("");
    let reason = failure.reason_code.as_deref().unwrap_or("");

    if is_invalid_credentials(failure.status_code, message, reason) {
        return Classified {
            category: ErrorCategory::InvalidCredentials,
            message: "Your API key is invalid or has expired. Generate a new key and update \
                      your configuration."
                .to_string(),
            retry_after_seconds: None,
        };
    }

    if is_quota_exceeded(failure.status_code, message) {
        let raw_seconds = failure
            .retry_after_seconds
            .or_else(|| parse_retry_in(message))
            .unwrap_or(DEFAULT_RETRY_SECONDS);
        let seconds = (raw_seconds.ceil() as u64).max(1);
        let minutes = seconds.div_ceil(60).max(1);
        return Classified {
            category: ErrorCategory::QuotaExceeded,
            message: format!(
                "API quota exceeded. Please wait about {} second{} ({} minute{}) before \
                 retrying, or check your plan and billing details.",
                seconds,
                plural(seconds),
                minutes,
                plural(minutes),
            ),
            retry_after_seconds: Some(seconds),
        };
    }

    if failure.status_code == Some(401) {
        return Classified {
            category: ErrorCategory::Unauthorized,
            message: "The request was not authorized. Verify your API key configuration and \
                      try again."
                .to_string(),
            retry_after_seconds: None,
        };
    }

    if failure.status_code == Some(400) {
        let detail = if message.is_empty() {
            "the service rejected the request"
        } else {
            message
        };
        return Classified {
            category: ErrorCategory::OtherBadRequest,
            message: format!("Invalid request: {}", detail),
            retry_after_seconds: None,
        };
    }

    let text = if message.is_empty() || GENERIC_WRAPPERS.contains(&message) {
        "An unexpected error occurred. Please try again later.".to_string()
    } else {
        message.to_string()
    };
    Classified {
        category: ErrorCategory::Unknown,
        message: text,
        retry_after_seconds: None,
    }
}

fn is_invalid_credentials(status: Option<u16>, message: &str, reason: &str) -> bool {
    if status != Some(400) {
        return false;
    }
    reason == "API_KEY_INVALID"
        || message.contains("API_KEY_INVALID")
        || message.contains("API key expired")
        || message.contains("API key not valid")
}

fn is_quota_exceeded(status: Option<u16>, message: &str) -> bool {
    if status == Some(429) {
        return true;
    }
    let lower = message.to_lowercase();
    lower.contains("quota")
        || lower.contains("rate limit")
        || lower.contains("rate-limit")
        || lower.contains("resource_exhausted")
}

/// Scan a message for "retry in N s" style wording.
fn parse_retry_in(message: &str) -> Option<f64> {
    static RETRY_IN: OnceLock<Regex> = OnceLock::new();
    let re = RETRY_IN
        .get_or_init(|| Regex::new(r"(?i)retry in\s+(\d+(?:\.\d+)?)\s*s").expect("valid pattern"));
    re.captures(message)?.get(1)?.as_str().parse().ok()
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_with_retry_in_message_reports_ceiling() {
        let failure = ServiceFailure::with_status(429)
            .message("Resource has been exhausted, please retry in 12.5s");
        let classified = classify(&failure);
        assert_eq!(classified.category, ErrorCategory::QuotaExceeded);
        assert_eq!(classified.retry_after_seconds, Some(13));
        assert_eq!(classified.retry_after_minutes(), Some(1));
        assert!(classified.message.contains("13 second"));
        assert!(classified.message.contains("1 minute"));
    }

    #[test]
    fn quota_prefers_structured_retry_after() {
        let failure = ServiceFailure::with_status(429)
            .message("please retry in 5s")
            .retry_after(90.0);
        let classified = classify(&failure);
        assert_eq!(classified.retry_after_seconds, Some(90));
        assert_eq!(classified.retry_after_minutes(), Some(2));
    }

    #[test]
    fn quota_without_delay_defaults_to_sixty_seconds() {
        let failure = ServiceFailure::with_status(429);
        let classified = classify(&failure);
        assert_eq!(classified.retry_after_seconds, Some(60));
        assert_eq!(classified.retry_after_minutes(), Some(1));
    }

    #[test]
    fn quota_matches_on_wording_without_status() {
        let failure = ServiceFailure::default().message("You have exceeded your quota");
        assert_eq!(classify(&failure).category, ErrorCategory::QuotaExceeded);
    }

    #[test]
    fn bad_request_with_invalid_key_reason_is_invalid_credentials() {
        let failure = ServiceFailure::with_status(400)
            .message("API key not valid. Please pass a valid API key.")
            .reason("API_KEY_INVALID");
        let classified = classify(&failure);
        assert_eq!(classified.category, ErrorCategory::InvalidCredentials);
        assert!(classified.retry_after_seconds.is_none());
    }

    #[test]
    fn invalid_credentials_takes_precedence_over_bad_request() {
        let failure = ServiceFailure::with_status(400).message("API key expired");
        assert_eq!(classify(&failure).category, ErrorCategory::InvalidCredentials);
    }

    #[test]
    fn bare_unauthorized_status() {
        let failure = ServiceFailure::with_status(401);
        let classified = classify(&failure);
        assert_eq!(classified.category, ErrorCategory::Unauthorized);
    }

    #[test]
    fn other_bad_request_surfaces_message_verbatim() {
        let failure = ServiceFailure::with_status(400).message("missing field: contents");
        let classified = classify(&failure);
        assert_eq!(classified.category, ErrorCategory::OtherBadRequest);
        assert_eq!(classified.message, "Invalid request: missing field: contents");
    }

    #[test]
    fn unknown_surfaces_distinct_message() {
        let failure = ServiceFailure::with_status(500).message("internal backend blew up");
        let classified = classify(&failure);
        assert_eq!(classified.category, ErrorCategory::Unknown);
        assert_eq!(classified.message, "internal backend blew up");
    }

    #[test]
    fn unknown_falls_back_on_generic_wrapper() {
        let failure =
            ServiceFailure::default().message("Failed to parse prompt. Please try again.");
        let classified = classify(&failure);
        assert_eq!(classified.category, ErrorCategory::Unknown);
        assert_eq!(
            classified.message,
            "An unexpected error occurred. Please try again later."
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let failure = ServiceFailure::with_status(429).message("retry in 7.2s");
        assert_eq!(classify(&failure), classify(&failure));
    }
}
