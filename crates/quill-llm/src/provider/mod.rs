pub mod config;

pub use config::ProviderConfig;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// One generation call: an instruction, a user message, and the JSON shape
/// the model must produce.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub user_message: String,
    pub response_schema: Value,
    pub safety_settings: Option<Value>,
}

impl GenerateRequest {
    pub fn new(
        system_instruction: impl Into<String>,
        user_message: impl Into<String>,
        response_schema: Value,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_message: user_message.into(),
            response_schema,
            safety_settings: None,
        }
    }

    pub fn with_safety_settings(mut self, settings: Value) -> Self {
        self.safety_settings = Some(settings);
        self
    }
}

/// The external text-generation service boundary.
///
/// Implementations return the raw JSON text the model produced for the
/// declared shape; failures are already mapped into `LlmError`.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn provider_id(&self) -> &str;

    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}
