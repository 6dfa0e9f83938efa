//! Agentic tool-calling loop.
//!
//! Drives the model ↔ tool round-trip: send the request, execute any tool
//! calls in the reply, append results, repeat until the model produces a
//! final text response or the iteration limit is reached.

use tracing::debug;

use super::executor::ToolExecutor;
use super::message::{ChatRequest, ChatResponse, assistant_tool_calls_message, tool_message};
use super::provider::LlmProvider;
use crate::error::AgentError;

/// Runs the loop: model → tool calls → tool results → model → …
///
/// The request is mutated in place: assistant tool-call messages and tool
/// results accumulate in `request.messages` across rounds.
///
/// # Errors
///
/// Returns [`AgentError::ToolLoopExceeded`] if the model keeps requesting
/// tools beyond `max_iterations`. Propagates provider errors.
pub async fn agentic_loop(
    provider: &dyn LlmProvider,
    request: &mut ChatRequest,
    executor: &ToolExecutor,
    max_iterations: usize,
) -> Result<ChatResponse, AgentError> {
    for iteration in 0..max_iterations {
        let response = provider.chat(request).await?;

        // No tool calls means a final answer
        if response.tool_calls.is_empty() {
            debug!(iteration, "agentic loop finished with text response");
            return Ok(response);
        }

        debug!(
            iteration,
            tool_count = response.tool_calls.len(),
            "executing tool calls"
        );

        request
            .messages
            .push(assistant_tool_calls_message(response.tool_calls.clone()));

        for call in &response.tool_calls {
            let result = executor.execute(call).await;
            debug!(
                tool = %call.name,
                call_id = %call.id,
                is_error = result.is_error,
                "tool execution complete"
            );
            request
                .messages
                .push(tool_message(&result.tool_call_id, &result.content));
        }
    }

    Err(AgentError::ToolLoopExceeded { max_iterations })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::agent::message::{TokenUsage, system_message, user_message};
    use crate::agent::tool::ToolCall;
    use crate::agent::tools::exa::ExaClient;
    use crate::agent::tools::reasoning::ReasoningToolkit;

    /// Provider that requests the `think` tool for the first N calls,
    /// then answers with text.
    struct ScriptedProvider {
        call_count: AtomicUsize,
        tool_rounds: usize,
    }

    impl ScriptedProvider {
        fn new(tool_rounds: usize) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                tool_rounds,
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            let count = self.call_count.fetch_add(1, Ordering::SeqCst);

            if count < self.tool_rounds {
                Ok(ChatResponse {
                    content: String::new(),
                    usage: TokenUsage::default(),
                    tool_calls: vec![ToolCall {
                        id: format!("call_{count}"),
                        name: "think".to_string(),
                        arguments: r#"{"thought":"keep going"}"#.to_string(),
                    }],
                    finish_reason: Some("tool_calls".to_string()),
                })
            } else {
                Ok(ChatResponse {
                    content: "Final research report.".to_string(),
                    usage: TokenUsage {
                        prompt_tokens: 200,
                        completion_tokens: 50,
                        total_tokens: 250,
                    },
                    tool_calls: Vec::new(),
                    finish_reason: Some("stop".to_string()),
                })
            }
        }
    }

    fn executor() -> ToolExecutor {
        ToolExecutor::new(ExaClient::new("test-key"), ReasoningToolkit::new(true))
    }

    fn request() -> ChatRequest {
        ChatRequest {
            model: "test".to_string(),
            messages: vec![system_message("analyst"), user_message("research x")],
            temperature: Some(0.0),
            max_tokens: Some(1024),
            json_mode: false,
            tools: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_no_tool_rounds() {
        let provider = ScriptedProvider::new(0);
        let mut req = request();
        let response = agentic_loop(&provider, &mut req, &executor(), 10)
            .await
            .unwrap_or_else(|e| panic!("loop failed: {e}"));
        assert_eq!(response.content, "Final research report.");
        assert_eq!(req.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_tool_rounds_append_messages() {
        let provider = ScriptedProvider::new(2);
        let mut req = request();
        let response = agentic_loop(&provider, &mut req, &executor(), 10)
            .await
            .unwrap_or_else(|e| panic!("loop failed: {e}"));
        assert_eq!(response.content, "Final research report.");
        // 2 initial + 2 rounds * (assistant + tool result) = 6
        assert_eq!(req.messages.len(), 6);
    }

    #[tokio::test]
    async fn test_iteration_limit() {
        let provider = ScriptedProvider::new(100);
        let mut req = request();
        let result = agentic_loop(&provider, &mut req, &executor(), 3).await;
        let Err(err) = result else {
            panic!("expected the iteration limit to trip");
        };
        assert!(matches!(err, AgentError::ToolLoopExceeded { max_iterations: 3 }));
    }
}
