//! Gemini `generateContent` adapter.
//!
//! Single-shot JSON-mode calls: `responseMimeType: "application/json"` plus
//! a response schema, so the model returns the declared shape without code
//! fences. Failures are mapped from the Google error envelope into the
//! closed `ServiceFailure` shape before they leave this module.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{LlmError, Result, ServiceFailure};
use crate::provider::{GenerateRequest, ModelProvider, ProviderConfig};

const TEMPERATURE: f64 = 0.1;

pub struct GeminiProvider {
    config: ProviderConfig,
    http_client: Client,
}

impl GeminiProvider {
    /// Create a provider from configuration.
    ///
    /// A missing API key is not a construction error; calls will fail with
    /// an invalid-credentials service failure instead.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a provider with the key resolved from the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = ProviderConfig::default();
        config.api_key = ProviderConfig::api_key_from_env();
        Self::new(config)
    }

    fn request_body(&self, request: &GenerateRequest) -> Value {
        let mut body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [ { "text": request.user_message } ]
                }
            ],
            "systemInstruction": {
                "parts": [ { "text": request.system_instruction } ]
            },
            "generationConfig": {
                "temperature": TEMPERATURE,
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema
            }
        });
        if let Some(settings) = &request.safety_settings {
            body["safetySettings"] = settings.clone();
        }
        body
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn provider_id(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                log::warn!("[LLM] no API key configured");
                return Err(LlmError::Service(
                    ServiceFailure::with_status(400)
                        .message("No API key configured for the model service.")
                        .reason("API_KEY_INVALID"),
                ));
            }
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, api_key
        );
        let body = self.request_body(&request);

        log::info!("[LLM] model: {}", self.config.model);

        let response = self
            .http_client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_header = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<f64>().ok());
            let text = response.text().await.unwrap_or_default();
            let failure = failure_from_body(status.as_u16(), retry_after_header, &text);
            log::error!("[LLM] API returned {}", failure);
            return Err(LlmError::Service(failure));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        let text = extract_text(&payload).ok_or_else(|| {
            LlmError::UnexpectedResponse("no text candidate in response".to_string())
        })?;
        Ok(text)
    }
}

/// Map an HTTP failure into the closed `ServiceFailure` shape.
///
/// Google error envelope: `error.message`, `error.details[]` entries typed
/// `ErrorInfo` (carrying `reason`) and `RetryInfo` (carrying `retryDelay`
/// such as `"12.5s"`).
fn failure_from_body(status: u16, retry_after_header: Option<f64>, body: &str) -> ServiceFailure {
    let mut failure = ServiceFailure::with_status(status);
    failure.retry_after_seconds = retry_after_header;

    let Ok(envelope) = serde_json::from_str::<Value>(body) else {
        if !body.trim().is_empty() {
            failure.message = Some(body.trim().to_string());
        }
        return failure;
    };
    let error = envelope.get("error").unwrap_or(&envelope);

    if let Some(message) = error.get("message").and_then(Value::as_str) {
        failure.message = Some(message.to_string());
    }
    if let Some(details) = error.get("details").and_then(Value::as_array) {
        for detail in details {
            let type_url = detail.get("@type").and_then(Value::as_str).unwrap_or("");
            if type_url.ends_with("ErrorInfo") {
                if let Some(reason) = detail.get("reason").and_then(Value::as_str) {
                    failure.reason_code = Some(reason.to_string());
                }
            } else if type_url.ends_with("RetryInfo") && failure.retry_after_seconds.is_none() {
                failure.retry_after_seconds = detail
                    .get("retryDelay")
                    .and_then(Value::as_str)
                    .and_then(parse_duration_literal);
            }
        }
    }
    failure
}

/// Parse a protobuf duration literal like `"12.5s"`.
fn parse_duration_literal(literal: &str) -> Option<f64> {
    literal.trim().strip_suffix('s')?.parse().ok()
}

/// Extract the generated text: `candidates[0].content.parts[0].text`.
fn extract_text(payload: &Value) -> Option<String> {
    payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_quota_envelope_with_retry_info() {
        let body = r#"{
            "error": {
                "code": 429,
                "message": "Resource has been exhausted",
                "status": "RESOURCE_EXHAUSTED",
                "details": [
                    {
                        "@type": "type.googleapis.com/google.rpc.RetryInfo",
                        "retryDelay": "12.5s"
                    }
                ]
            }
        }"#;
        let failure = failure_from_body(429, None, body);
        assert_eq!(failure.status_code, Some(429));
        assert_eq!(failure.retry_after_seconds, Some(12.5));
        assert_eq!(failure.message.as_deref(), Some("Resource has been exhausted"));
    }

    #[test]
    fn maps_invalid_key_envelope_with_error_info() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [
                    {
                        "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                        "reason": "API_KEY_INVALID",
                        "domain": "googleapis.com"
                    }
                ]
            }
        }"#;
        let failure = failure_from_body(400, None, body);
        assert_eq!(failure.reason_code.as_deref(), Some("API_KEY_INVALID"));
    }

    #[test]
    fn header_retry_after_wins_over_retry_info() {
        let body = r#"{
            "error": {
                "message": "slow down",
                "details": [
                    { "@type": ".../RetryInfo", "retryDelay": "30s" }
                ]
            }
        }"#;
        let failure = failure_from_body(429, Some(7.0), body);
        assert_eq!(failure.retry_after_seconds, Some(7.0));
    }

    #[test]
    fn non_json_body_becomes_plain_message() {
        let failure = failure_from_body(502, None, "Bad Gateway");
        assert_eq!(failure.message.as_deref(), Some("Bad Gateway"));
        assert!(failure.reason_code.is_none());
    }

    #[test]
    fn extracts_candidate_text() {
        let payload = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"a\":1}" } ] } }
            ]
        });
        assert_eq!(extract_text(&payload).as_deref(), Some("{\"a\":1}"));
        assert!(extract_text(&serde_json::json!({})).is_none());
    }

    #[test]
    fn parses_duration_literals() {
        assert_eq!(parse_duration_literal("12.5s"), Some(12.5));
        assert_eq!(parse_duration_literal("60s"), Some(60.0));
        assert_eq!(parse_duration_literal("bogus"), None);
    }
}
