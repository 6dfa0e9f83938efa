//! Credential sourcing and model backend selection.
//!
//! Credentials are read from the process environment at initialization
//! time and never cached elsewhere; a failed initialization attempt sees
//! fresh values on the next attempt.

use crate::error::AgentError;

/// Fixed model identifier used with the hosted `OpenAI` backend.
pub const OPENAI_MODEL_ID: &str = "gpt-4o";

/// Default model identifier for the `OpenRouter` backend.
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o";

/// Optional credential strings sourced from the environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// `OPENAI_API_KEY`.
    pub openai_api_key: Option<String>,
    /// `OPENROUTER_API_KEY`.
    pub openrouter_api_key: Option<String>,
    /// `EXA_API_KEY` (mandatory for initialization).
    pub exa_api_key: Option<String>,
    /// `MODEL_NAME` (only meaningful for the `OpenRouter` backend).
    pub model_name: Option<String>,
}

/// The selected model backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    /// Hosted `OpenAI` with the fixed model identifier.
    OpenAi {
        /// API key for the backend.
        api_key: String,
    },
    /// `OpenRouter` with a caller-chosen or default model.
    OpenRouter {
        /// API key for the backend.
        api_key: String,
        /// Model identifier to request.
        model: String,
    },
}

impl ModelChoice {
    /// Model identifier this choice resolves to.
    #[must_use]
    pub fn model_id(&self) -> &str {
        match self {
            Self::OpenAi { .. } => OPENAI_MODEL_ID,
            Self::OpenRouter { model, .. } => model,
        }
    }
}

impl Credentials {
    /// Reads all credentials from the process environment.
    ///
    /// Empty-string values are treated as absent.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env_non_empty("OPENAI_API_KEY"),
            openrouter_api_key: env_non_empty("OPENROUTER_API_KEY"),
            exa_api_key: env_non_empty("EXA_API_KEY"),
            model_name: env_non_empty("MODEL_NAME"),
        }
    }

    /// Selects the model backend. Ordered, first match wins:
    ///
    /// 1. `OpenAI` key present → hosted `OpenAI` with [`OPENAI_MODEL_ID`].
    /// 2. `OpenRouter` key present → `OpenRouter` with the supplied or
    ///    default model name.
    /// 3. Neither → [`AgentError::ModelKeyMissing`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ModelKeyMissing`] when no model credential
    /// is present.
    pub fn select_model(&self) -> Result<ModelChoice, AgentError> {
        if let Some(api_key) = &self.openai_api_key {
            return Ok(ModelChoice::OpenAi {
                api_key: api_key.clone(),
            });
        }

        if let Some(api_key) = &self.openrouter_api_key {
            return Ok(ModelChoice::OpenRouter {
                api_key: api_key.clone(),
                model: self
                    .model_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
            });
        }

        Err(AgentError::ModelKeyMissing)
    }
}

/// Reads an environment variable, mapping empty values to `None`.
fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
