//! Pluggable LLM provider trait.
//!
//! Implementations translate the provider-agnostic [`ChatRequest`] and
//! [`ChatResponse`] into SDK-specific calls, keeping the agent and the
//! initialization gate decoupled from any particular model vendor.

use async_trait::async_trait;

use super::message::{ChatRequest, ChatResponse};
use crate::error::AgentError;

/// Trait for LLM model backends.
///
/// A provider owns the transport for one backend (credentials, base URL,
/// HTTP client) and presents a uniform chat interface to the agent.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Backend name (e.g. `"openai"`, `"openrouter"`).
    fn name(&self) -> &'static str;

    /// Executes a chat completion request.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiRequest`] on transport or API failures.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError>;
}
