//! External tool capabilities wired into the research agent.

pub mod exa;
pub mod reasoning;

pub use exa::{ExaClient, ExaResult, ExaSearchResponse};
pub use reasoning::ReasoningToolkit;
