//! `OpenRouter` backend.
//!
//! `OpenRouter` exposes many hosted models behind an `OpenAI`-compatible
//! API, so this is the same SDK pointed at a different base URL. Selected
//! when `OPENROUTER_API_KEY` is present and `OPENAI_API_KEY` is not; the
//! model identifier comes from `MODEL_NAME` or the factory default.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_trait::async_trait;

use super::convert;
use crate::agent::message::{ChatRequest, ChatResponse};
use crate::agent::provider::LlmProvider;
use crate::error::AgentError;

/// `OpenRouter` API base URL.
const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

/// `OpenRouter` chat-completion backend.
pub struct OpenRouterProvider {
    client: Client<OpenAIConfig>,
    structured_outputs: bool,
}

impl OpenRouterProvider {
    /// Creates a provider from an API key, with native structured-output
    /// support enabled. No network calls occur here.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(OPENROUTER_API_BASE);
        Self {
            client: Client::with_config(config),
            structured_outputs: true,
        }
    }

    /// Whether this backend honors `json_mode` on requests.
    #[must_use]
    pub const fn supports_structured_outputs(&self) -> bool {
        self.structured_outputs
    }
}

impl std::fmt::Debug for OpenRouterProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterProvider")
            .field("structured_outputs", &self.structured_outputs)
            .field("client", &"<async-openai::Client>")
            .finish()
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let sdk_request = convert::to_sdk_request(request, self.structured_outputs);

        let response = self
            .client
            .chat()
            .create(sdk_request)
            .await
            .map_err(|e| AgentError::ApiRequest {
                message: e.to_string(),
                status: None,
            })?;

        Ok(convert::from_sdk_response(response))
    }
}
