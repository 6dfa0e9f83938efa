//! Agent factory: backend selection and one-shot agent construction.
//!
//! Deterministically selects a model backend from the available
//! credentials and constructs one [`ResearchAgent`] bound to the fixed
//! prompt contract and the research/reasoning tools. Construction builds
//! in-memory objects only; no network calls happen here.

use std::sync::Arc;

use tracing::info;

use crate::error::AgentError;

use super::credentials::{Credentials, ModelChoice};
use super::provider::LlmProvider;
use super::providers::{OpenAiProvider, OpenRouterProvider};
use super::research::ResearchAgent;
use super::tools::exa::ExaClient;
use super::tools::reasoning::ReasoningToolkit;

/// Builds the research agent from the given credentials.
///
/// The Exa search credential is mandatory and checked first, independent
/// of which model backend would be chosen. Backend selection is ordered
/// (`OpenAI`, then `OpenRouter`); the losing backend is never
/// constructed.
///
/// # Errors
///
/// Returns [`AgentError::SearchKeyMissing`] when the Exa credential is
/// absent, and [`AgentError::ModelKeyMissing`] when neither model
/// credential is present.
pub fn build_agent(credentials: &Credentials) -> Result<ResearchAgent, AgentError> {
    let exa_key = credentials
        .exa_api_key
        .as_deref()
        .ok_or(AgentError::SearchKeyMissing)?;

    let choice = credentials.select_model()?;
    let model = choice.model_id().to_string();

    let provider: Arc<dyn LlmProvider> = match &choice {
        ModelChoice::OpenAi { api_key } => Arc::new(OpenAiProvider::new(api_key)),
        ModelChoice::OpenRouter { api_key, .. } => Arc::new(OpenRouterProvider::new(api_key)),
    };

    info!(backend = provider.name(), %model, "model backend selected");

    let agent = ResearchAgent::new(
        provider,
        model,
        ExaClient::new(exa_key),
        ReasoningToolkit::new(true),
    );

    info!("deep research agent initialized");
    Ok(agent)
}
