//! Hosted `OpenAI` backend.
//!
//! Selected when `OPENAI_API_KEY` is present; always used with the fixed
//! `gpt-4o` model identifier chosen by the factory.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_trait::async_trait;

use super::convert;
use crate::agent::message::{ChatRequest, ChatResponse};
use crate::agent::provider::LlmProvider;
use crate::error::AgentError;

/// Hosted `OpenAI` chat-completion backend.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAiProvider {
    /// Creates a provider from an API key. No network calls occur here.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
        }
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("client", &"<async-openai::Client>")
            .finish()
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let sdk_request = convert::to_sdk_request(request, true);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let provider = OpenAiProvider::new("sk-test");
        assert_eq!(provider.name(), "openai");
    }
}
