//! Deep research agent: an LLM-backed research service with web research
//! tools and citation tracking.
//!
//! The crate wires together a model provider (`OpenAI` or `OpenRouter`),
//! the Exa web-research tool, a reasoning scratchpad, and a lazy
//! single-flight initialization handler that the hosting layer invokes
//! with chat-style messages.
//!
//! # Architecture
//!
//! ```text
//! HTTP request → server → ResearchHandler::handle(messages)
//!   ├── first call: single-flight gate → agent factory
//!   │     ├── credential check (Exa mandatory)
//!   │     └── model selection (OpenAI > OpenRouter > error)
//!   └── ResearchAgent::run → agentic loop → model + tools
//! ```
//!
//! The initialization gate guarantees at most one construction attempt is
//! in flight, never caches failures, and treats a successful construction
//! as final for the process lifetime.

pub mod agent;
pub mod config;
pub mod error;
pub mod handler;
pub mod server;

// Re-export the surface the hosting layer touches
pub use agent::{ChatMessage, ResearchAgent, Role, RunResponse, build_agent};
pub use config::ServiceConfig;
pub use error::AgentError;
pub use handler::ResearchHandler;
