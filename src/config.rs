//! Service configuration loaded from `agent_config.json`.
//!
//! This is the configuration mapping handed to the hosting layer
//! (deployment URL, exposure flags, CORS origins, declared environment
//! variables). The agent core does not interpret it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AgentError;

/// Default deployment URL when no config file is found.
const DEFAULT_URL: &str = "http://127.0.0.1:3773";

/// Deployment settings for the hosting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// URL the server binds to.
    pub url: String,
    /// Whether the agent is exposed beyond localhost.
    #[serde(default)]
    pub expose: bool,
    /// Hosting protocol version string.
    #[serde(default)]
    pub protocol_version: Option<String>,
    /// Trusted proxy addresses.
    #[serde(default)]
    pub proxy_urls: Vec<String>,
    /// Allowed CORS origins (`"*"` allows any).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            expose: true,
            protocol_version: Some("1.0.0".to_string()),
            proxy_urls: vec!["127.0.0.1".to_string()],
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// A declared environment variable requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvVarSpec {
    /// Environment variable name.
    pub key: String,
    /// What the variable is for.
    #[serde(default)]
    pub description: String,
    /// Whether the variable must be set for the agent to initialize.
    #[serde(default)]
    pub required: bool,
}

/// Full service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Agent name.
    pub name: String,
    /// Agent description.
    #[serde(default)]
    pub description: String,
    /// Agent version.
    #[serde(default)]
    pub version: String,
    /// Deployment settings.
    #[serde(default)]
    pub deployment: DeploymentConfig,
    /// Declared environment variables.
    #[serde(default)]
    pub environment_variables: Vec<EnvVarSpec>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "deep-research-agent".to_string(),
            description: "AI Deep Research Agent with Citation Tracking".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            deployment: DeploymentConfig::default(),
            environment_variables: vec![
                EnvVarSpec {
                    key: "OPENAI_API_KEY".to_string(),
                    description: "OpenAI API key".to_string(),
                    required: false,
                },
                EnvVarSpec {
                    key: "OPENROUTER_API_KEY".to_string(),
                    description: "OpenRouter API key".to_string(),
                    required: false,
                },
                EnvVarSpec {
                    key: "EXA_API_KEY".to_string(),
                    description: "Exa API key for web research".to_string(),
                    required: true,
                },
                EnvVarSpec {
                    key: "MODEL_NAME".to_string(),
                    description: "Model ID for OpenRouter".to_string(),
                    required: false,
                },
            ],
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from the first readable candidate location,
    /// falling back to compiled-in defaults when none is found.
    ///
    /// Candidates, in order: the explicit path (if given), then
    /// `agent_config.json` in the current working directory. An explicit
    /// path that exists but fails to parse is an error; for discovered
    /// candidates a parse failure logs a warning and falls through.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] when an explicitly given path is
    /// unreadable or invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AgentError> {
        if let Some(path) = explicit {
            return Self::read_file(path);
        }

        let candidates: Vec<PathBuf> = vec![PathBuf::from("agent_config.json")];

        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::read_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    warn!(path = %candidate.display(), error = %e, "skipping unreadable config");
                }
            }
        }

        Ok(Self::default())
    }

    /// Reads and parses one configuration file.
    fn read_file(path: &Path) -> Result<Self, AgentError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AgentError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&raw).map_err(|e| AgentError::Config {
            message: format!("invalid JSON in {}: {e}", path.display()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_mirror_service_contract() {
        let config = ServiceConfig::default();
        assert_eq!(config.name, "deep-research-agent");
        assert_eq!(config.deployment.url, "http://127.0.0.1:3773");
        assert_eq!(config.deployment.cors_origins, vec!["*".to_string()]);

        let required: Vec<&str> = config
            .environment_variables
            .iter()
            .filter(|v| v.required)
            .map(|v| v.key.as_str())
            .collect();
        assert_eq!(required, vec!["EXA_API_KEY"]);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|e| panic!("tempfile: {e}"));
        writeln!(
            file,
            r#"{{
                "name": "custom-agent",
                "description": "test",
                "version": "2.0.0",
                "deployment": {{
                    "url": "http://0.0.0.0:8080",
                    "expose": false,
                    "cors_origins": ["https://example.com"]
                }}
            }}"#
        )
        .unwrap_or_else(|e| panic!("write: {e}"));

        let config =
            ServiceConfig::load(Some(file.path())).unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(config.name, "custom-agent");
        assert_eq!(config.deployment.url, "http://0.0.0.0:8080");
        assert!(!config.deployment.expose);
        assert_eq!(
            config.deployment.cors_origins,
            vec!["https://example.com".to_string()]
        );
        // Unspecified sections fall back to serde defaults.
        assert!(config.environment_variables.is_empty());
    }

    #[test]
    fn test_load_explicit_invalid_json_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|e| panic!("tempfile: {e}"));
        writeln!(file, "not json").unwrap_or_else(|e| panic!("write: {e}"));

        let result = ServiceConfig::load(Some(file.path()));
        assert!(matches!(result, Err(AgentError::Config { .. })));
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        let result = ServiceConfig::load(Some(Path::new("/nonexistent/agent_config.json")));
        assert!(matches!(result, Err(AgentError::Config { .. })));
    }
}
