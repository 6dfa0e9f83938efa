//! Tool type definitions for function-calling.
//!
//! The research agent exposes three tools to the model: `research`
//! (web research via the Exa API), and the `think`/`analyze` reasoning
//! scratchpad. Definitions carry JSON Schema parameter descriptions in
//! the shape OpenAI-compatible APIs expect.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A tool definition that can be sent to an LLM for function-calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the dispatch table in the executor).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call (assigned by the provider).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded arguments for the tool.
    pub arguments: String,
}

/// The result of executing a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this result corresponds to.
    pub tool_call_id: String,
    /// Result content (JSON string on success, error message on failure).
    pub content: String,
    /// Whether this result represents an error.
    pub is_error: bool,
}

/// The set of tool definitions bound to the research agent.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    definitions: Vec<ToolDefinition>,
}

impl ToolSet {
    /// Returns the tool definitions in this set.
    #[must_use]
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Returns `true` if this set contains no tools.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns the number of tools in this set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Tool set for the deep research agent: `research`, `think`, `analyze`.
    #[must_use]
    pub fn research_tools() -> Self {
        Self {
            definitions: vec![def_research(), def_think(), def_analyze()],
        }
    }
}

// ---------------------------------------------------------------------------
// Tool schema definitions
// ---------------------------------------------------------------------------

/// Defines the `research` tool.
fn def_research() -> ToolDefinition {
    ToolDefinition {
        name: "research".to_string(),
        description: "Perform deep web research on a topic or question. Returns an array of \
                       sources with title, URL, publication date, and text excerpts. Every \
                       source is a citation; preserve them in your output."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The research topic or question to investigate."
                },
                "num_results": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 25,
                    "description": "Number of sources to retrieve. Defaults to 10.",
                    "default": 10
                }
            },
            "required": ["query"],
            "additionalProperties": false
        }),
    }
}

/// Defines the `think` tool.
fn def_think() -> ToolDefinition {
    ToolDefinition {
        name: "think".to_string(),
        description: "Record a planning thought before acting. Use this to lay out your \
                       research approach: what to search, in what order, and what evidence \
                       would answer the question."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "thought": {
                    "type": "string",
                    "description": "The planning thought to record."
                }
            },
            "required": ["thought"],
            "additionalProperties": false
        }),
    }
}

/// Defines the `analyze` tool.
fn def_analyze() -> ToolDefinition {
    ToolDefinition {
        name: "analyze".to_string(),
        description: "Record an analysis of research findings: what the evidence shows, how \
                       sources agree or conflict, and what follow-up is needed before \
                       drafting the report."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "analysis": {
                    "type": "string",
                    "description": "The analysis of findings gathered so far."
                },
                "next_action": {
                    "type": "string",
                    "enum": ["continue", "validate", "final_answer"],
                    "description": "What to do next. Defaults to 'continue'.",
                    "default": "continue"
                }
            },
            "required": ["analysis"],
            "additionalProperties": false
        }),
    }
}
