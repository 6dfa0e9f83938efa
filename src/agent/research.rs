//! The deep research agent.
//!
//! One agent instance is bound to one model backend, the research and
//! reasoning tools, and the fixed instruction/output-format contract.
//! Construction is pure (no network I/O); all external calls happen in
//! [`ResearchAgent::run`].

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::AgentError;

use super::agentic_loop::agentic_loop;
use super::executor::ToolExecutor;
use super::message::{ChatMessage, ChatRequest, TokenUsage, system_message};
use super::prompt::build_system_prompt;
use super::provider::LlmProvider;
use super::tool::ToolSet;
use super::tools::exa::ExaClient;
use super::tools::reasoning::ReasoningToolkit;

/// Default maximum tokens for the final report.
const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Maximum tool-calling round-trips per run.
const DEFAULT_MAX_TOOL_ITERATIONS: usize = 10;

/// Response from one agent run, returned to the hosting layer unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    /// Unique identifier for this run.
    pub run_id: String,
    /// The agent's final text output (markdown report).
    pub content: String,
    /// Model identifier that produced the response.
    pub model: String,
    /// Token usage from the final completion.
    pub usage: TokenUsage,
    /// Finish reason from the model, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// A research-capable agent bound to one model backend and two tools.
pub struct ResearchAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
    system_prompt: String,
    tools: ToolSet,
    executor: ToolExecutor,
    max_tool_iterations: usize,
}

impl std::fmt::Debug for ResearchAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchAgent")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("tools", &self.tools.len())
            .finish_non_exhaustive()
    }
}

impl ResearchAgent {
    /// Creates an agent bound to the given backend and tool clients.
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: String,
        exa: ExaClient,
        reasoning: ReasoningToolkit,
    ) -> Self {
        let system_prompt = build_system_prompt(reasoning.instructions());
        Self {
            provider,
            model,
            system_prompt,
            tools: ToolSet::research_tools(),
            executor: ToolExecutor::new(exa, reasoning),
            max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
        }
    }

    /// Backend name this agent is bound to.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Model identifier this agent is bound to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Runs the agent against the caller's message sequence.
    ///
    /// The caller's messages are forwarded verbatim after the system
    /// prompt (which carries the current date for time-sensitive
    /// research). Tool calls requested by the model are executed through
    /// the agentic loop; the final text becomes the response content.
    ///
    /// # Errors
    ///
    /// Propagates provider and tool failures unchanged; no retry or
    /// partial-result recovery happens at this layer.
    pub async fn run(&self, messages: &[ChatMessage]) -> Result<RunResponse, AgentError> {
        let run_id = Uuid::new_v4().to_string();

        let system = format!(
            "{}\n\nCurrent date: {}",
            self.system_prompt,
            Utc::now().format("%Y-%m-%d")
        );

        let mut request_messages = Vec::with_capacity(messages.len() + 1);
        request_messages.push(system_message(&system));
        request_messages.extend_from_slice(messages);

        let mut request = ChatRequest {
            model: self.model.clone(),
            messages: request_messages,
            temperature: Some(0.0),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            json_mode: false,
            tools: self.tools.definitions().to_vec(),
        };

        let response = agentic_loop(
            self.provider.as_ref(),
            &mut request,
            &self.executor,
            self.max_tool_iterations,
        )
        .await?;

        info!(
            %run_id,
            model = %self.model,
            total_tokens = response.usage.total_tokens,
            "agent run complete"
        );

        Ok(RunResponse {
            run_id,
            content: response.content,
            model: self.model.clone(),
            usage: response.usage,
            finish_reason: response.finish_reason,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::agent::message::{ChatResponse, Role, user_message};

    /// Provider that records the request it receives and replies with a
    /// fixed text response.
    struct RecordingProvider {
        seen_messages: Mutex<Vec<ChatMessage>>,
        reply: String,
    }

    impl RecordingProvider {
        fn new(reply: &str) -> Self {
            Self {
                seen_messages: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            if let Ok(mut seen) = self.seen_messages.lock() {
                seen.clone_from(&request.messages);
            }
            Ok(ChatResponse {
                content: self.reply.clone(),
                usage: TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                },
                tool_calls: Vec::new(),
                finish_reason: Some("stop".to_string()),
            })
        }
    }

    fn agent_with(provider: Arc<RecordingProvider>) -> ResearchAgent {
        ResearchAgent::new(
            provider,
            "gpt-4o".to_string(),
            ExaClient::new("test-key"),
            ReasoningToolkit::new(true),
        )
    }

    #[tokio::test]
    async fn test_run_passes_messages_through_after_system_prompt() {
        let provider = Arc::new(RecordingProvider::new("report"));
        let agent = agent_with(provider.clone());

        let messages = vec![
            user_message("Research quantum computing advancements"),
            user_message("Focus on 2026"),
        ];
        agent
            .run(&messages)
            .await
            .unwrap_or_else(|e| panic!("run failed: {e}"));

        let seen = provider
            .seen_messages
            .lock()
            .unwrap_or_else(|_| panic!("lock poisoned"));
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[1].content, "Research quantum computing advancements");
        assert_eq!(seen[2].content, "Focus on 2026");
    }

    #[tokio::test]
    async fn test_run_returns_provider_output_unmodified() {
        let provider = Arc::new(RecordingProvider::new("# Research Report: X\n\nFindings."));
        let agent = agent_with(provider);

        let response = agent
            .run(&[user_message("Hello")])
            .await
            .unwrap_or_else(|e| panic!("run failed: {e}"));

        assert_eq!(response.content, "# Research Report: X\n\nFindings.");
        assert_eq!(response.model, "gpt-4o");
        assert_eq!(response.usage.total_tokens, 15);
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert!(!response.run_id.is_empty());
    }

    #[tokio::test]
    async fn test_system_prompt_carries_current_date() {
        let provider = Arc::new(RecordingProvider::new("report"));
        let agent = agent_with(provider.clone());

        agent
            .run(&[user_message("hi")])
            .await
            .unwrap_or_else(|e| panic!("run failed: {e}"));

        let seen = provider
            .seen_messages
            .lock()
            .unwrap_or_else(|_| panic!("lock poisoned"));
        let today = Utc::now().format("%Y-%m-%d").to_string();
        assert!(seen[0].content.contains(&today));
    }

    #[test]
    fn test_run_response_serializes_for_hosting_layer() {
        let response = RunResponse {
            run_id: "test-run-id".to_string(),
            content: "done".to_string(),
            model: "gpt-4o".to_string(),
            usage: TokenUsage::default(),
            finish_reason: None,
        };
        let json = serde_json::to_value(&response).unwrap_or_default();
        assert_eq!(json["run_id"], "test-run-id");
        assert!(json.get("finish_reason").is_none());
    }
}
