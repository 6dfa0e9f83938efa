//! Tool executor dispatching model tool calls to their implementations.
//!
//! Maps tool names to the Exa client (`research`) and the reasoning
//! toolkit (`think`, `analyze`). Arguments arrive as model-produced JSON
//! and are validated before dispatch.

use serde::Deserialize;

use crate::error::AgentError;

use super::tool::{ToolCall, ToolResult};
use super::tools::exa::{DEFAULT_NUM_RESULTS, ExaClient};
use super::tools::reasoning::ReasoningToolkit;

/// Maximum raw byte length of tool argument JSON from the LLM.
const MAX_TOOL_ARGS_LEN: usize = 100_000;

/// Arguments for the `research` tool.
#[derive(Debug, Deserialize)]
struct ResearchArgs {
    query: String,
    #[serde(default)]
    num_results: Option<usize>,
}

/// Arguments for the `think` tool.
#[derive(Debug, Deserialize)]
struct ThinkArgs {
    thought: String,
}

/// Arguments for the `analyze` tool.
#[derive(Debug, Deserialize)]
struct AnalyzeArgs {
    analysis: String,
    #[serde(default)]
    next_action: Option<String>,
}

/// Executes tool calls against the agent's bound capabilities.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    exa: ExaClient,
    reasoning: ReasoningToolkit,
}

impl ToolExecutor {
    /// Creates an executor bound to the given clients.
    #[must_use]
    pub const fn new(exa: ExaClient, reasoning: ReasoningToolkit) -> Self {
        Self { exa, reasoning }
    }

    /// Dispatches a tool call to the appropriate implementation.
    ///
    /// Never fails: execution errors are folded into an error-flagged
    /// [`ToolResult`] so the model can see and react to them.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        if call.arguments.len() > MAX_TOOL_ARGS_LEN {
            return ToolResult {
                tool_call_id: call.id.clone(),
                content: format!(
                    "tool arguments too large ({} bytes, max {MAX_TOOL_ARGS_LEN})",
                    call.arguments.len()
                ),
                is_error: true,
            };
        }

        let result = match call.name.as_str() {
            "research" => self.tool_research(&call.arguments).await,
            "think" => self.tool_think(&call.arguments),
            "analyze" => self.tool_analyze(&call.arguments),
            other => Err(AgentError::ToolExecution {
                name: other.to_string(),
                message: "unknown tool".to_string(),
            }),
        };

        match result {
            Ok(content) => ToolResult {
                tool_call_id: call.id.clone(),
                content,
                is_error: false,
            },
            Err(e) => ToolResult {
                tool_call_id: call.id.clone(),
                content: e.to_string(),
                is_error: true,
            },
        }
    }

    /// Runs the `research` tool: Exa search with page text, serialized
    /// back to the model as JSON.
    async fn tool_research(&self, arguments: &str) -> Result<String, AgentError> {
        let args: ResearchArgs = parse_args("research", arguments)?;
        let num_results = args.num_results.unwrap_or(DEFAULT_NUM_RESULTS);

        let response = self.exa.search(&args.query, num_results).await?;

        serde_json::to_string(&response).map_err(|e| AgentError::ToolExecution {
            name: "research".to_string(),
            message: format!("failed to serialize results: {e}"),
        })
    }

    /// Runs the `think` tool.
    fn tool_think(&self, arguments: &str) -> Result<String, AgentError> {
        let args: ThinkArgs = parse_args("think", arguments)?;
        Ok(self.reasoning.think(&args.thought))
    }

    /// Runs the `analyze` tool.
    fn tool_analyze(&self, arguments: &str) -> Result<String, AgentError> {
        let args: AnalyzeArgs = parse_args("analyze", arguments)?;
        let next_action = args.next_action.as_deref().unwrap_or("continue");
        Ok(self.reasoning.analyze(&args.analysis, next_action))
    }
}

/// Parses tool arguments, mapping JSON errors to [`AgentError::ToolExecution`].
fn parse_args<'a, T: Deserialize<'a>>(name: &str, arguments: &'a str) -> Result<T, AgentError> {
    serde_json::from_str(arguments).map_err(|e| AgentError::ToolExecution {
        name: name.to_string(),
        message: format!("invalid arguments: {e}"),
    })
}
