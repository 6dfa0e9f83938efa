//! Error taxonomy for the deep research agent.
//!
//! Configuration errors (missing credentials, bad config files) are
//! distinguished from downstream failures (API calls, tool execution) so
//! the hosting layer can map them to different status codes.

/// Errors returned by agent construction, dispatch, and execution.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The mandatory web-research credential is absent.
    #[error("EXA_API_KEY is required. Get one from: https://exa.ai")]
    SearchKeyMissing,

    /// Neither model provider credential is present.
    #[error("no model API key found; set OPENAI_API_KEY or OPENROUTER_API_KEY")]
    ModelKeyMissing,

    /// The agent was queried before a successful initialization.
    #[error("agent is not initialized")]
    NotInitialized,

    /// A downstream HTTP or SDK call failed.
    #[error("API request failed{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    ApiRequest {
        /// Human-readable failure description.
        message: String,
        /// HTTP status code, when the failure carried one.
        status: Option<u16>,
    },

    /// A tool invocation failed.
    #[error("tool '{name}' failed: {message}")]
    ToolExecution {
        /// Name of the tool that failed.
        name: String,
        /// Failure description.
        message: String,
    },

    /// The model kept requesting tools past the iteration limit.
    #[error("tool loop exceeded {max_iterations} iterations without a final response")]
    ToolLoopExceeded {
        /// The limit that was hit.
        max_iterations: usize,
    },

    /// A response body could not be parsed.
    #[error("failed to parse response: {message}")]
    ResponseParse {
        /// Parse failure description.
        message: String,
    },

    /// The service configuration file is unreadable or invalid.
    #[error("configuration error: {message}")]
    Config {
        /// Failure description.
        message: String,
    },
}

impl AgentError {
    /// Whether this error reflects deployment configuration rather than a
    /// transient downstream failure.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::SearchKeyMissing | Self::ModelKeyMissing | Self::Config { .. }
        )
    }
}
