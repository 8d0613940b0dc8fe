pub mod classify;
pub mod error;
pub mod ops;
pub mod prompts;
pub mod provider;
pub mod providers;

// Re-export core types
pub use classify::{classify, Classified, ErrorCategory};
pub use error::{LlmError, Result, ServiceFailure};
pub use ops::PromptOps;
pub use provider::{GenerateRequest, ModelProvider, ProviderConfig};
pub use providers::GeminiProvider;
