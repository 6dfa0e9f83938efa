//! Deep research agent core.
//!
//! A small agent system in three layers:
//!
//! ```text
//! handler (lazy single-flight gate, in crate root)
//!   └── factory → ResearchAgent
//!         ├── LlmProvider (OpenAI | OpenRouter, via async-openai)
//!         └── agentic loop → ToolExecutor
//!               ├── research (Exa web search)
//!               └── think / analyze (reasoning scratchpad)
//! ```
//!
//! Messages, tool definitions, and responses are provider-agnostic; only
//! the `providers` module knows the SDK wire types.

pub mod agentic_loop;
pub mod credentials;
pub mod executor;
pub mod factory;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod research;
pub mod tool;
pub mod tools;

// Re-export key types
pub use credentials::{Credentials, ModelChoice};
pub use factory::build_agent;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use provider::LlmProvider;
pub use research::{ResearchAgent, RunResponse};
pub use tool::{ToolCall, ToolDefinition, ToolResult, ToolSet};
pub use tools::{ExaClient, ReasoningToolkit};
