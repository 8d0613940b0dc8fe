use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_timeout() -> u64 {
    60
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Base URL for the generation API
    pub base_url: String,
    /// Model to call
    pub model: String,
    /// API key; a missing key yields a provider that fails deterministically
    /// with an invalid-credentials failure rather than a constructor error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_seconds = timeout.as_secs();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Look up an API key from the environment, checking the supported
    /// variable names in precedence order.
    pub fn api_key_from_env() -> Option<String> {
        ["GOOGLE_GENAI_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"]
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|key| !key.is_empty()))
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(
            "gemini-2.0-flash",
            "https://generativelanguage.googleapis.com/v1beta",
        )
    }
}
