//! Exa web research client backing the `research` tool.
//!
//! Thin wrapper over the Exa search API (`POST /search` with text
//! contents). Results carry the URL, title, and publication date the
//! agent needs for citations.

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Exa API base URL.
const EXA_API_BASE: &str = "https://api.exa.ai";

/// Default number of sources per research call.
pub const DEFAULT_NUM_RESULTS: usize = 10;

/// Cap on sources per research call.
pub const MAX_NUM_RESULTS: usize = 25;

/// Client for the Exa search API.
#[derive(Debug, Clone)]
pub struct ExaClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Request body for `POST /search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody<'a> {
    query: &'a str,
    num_results: usize,
    contents: ContentsSpec,
}

/// Asks Exa to include page text in each result.
#[derive(Debug, Serialize)]
struct ContentsSpec {
    text: bool,
}

/// Response body for `POST /search`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExaSearchResponse {
    /// Search results, most relevant first.
    pub results: Vec<ExaResult>,
}

/// One search result with citation metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaResult {
    /// Source URL (the citation).
    pub url: String,
    /// Page title, when available.
    #[serde(default)]
    pub title: Option<String>,
    /// Publication date, when available.
    #[serde(default)]
    pub published_date: Option<String>,
    /// Author, when available.
    #[serde(default)]
    pub author: Option<String>,
    /// Extracted page text, when requested.
    #[serde(default)]
    pub text: Option<String>,
}

impl ExaClient {
    /// Creates a client from an API key. No network calls occur here.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: EXA_API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL (proxies, local stubs).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Runs a search, requesting page text for each result.
    ///
    /// `num_results` is clamped to [`MAX_NUM_RESULTS`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiRequest`] on transport failures or non-2xx
    /// responses, and [`AgentError::ResponseParse`] on malformed payloads.
    pub async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<ExaSearchResponse, AgentError> {
        let body = SearchBody {
            query,
            num_results: num_results.min(MAX_NUM_RESULTS),
            contents: ContentsSpec { text: true },
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::ApiRequest {
                message: format!("Exa search request failed: {e}"),
                status: e.status().map(|s| s.as_u16()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AgentError::ApiRequest {
                message: format!("Exa search returned {status}: {detail}"),
                status: Some(status.as_u16()),
            });
        }

        response
            .json::<ExaSearchResponse>()
            .await
            .map_err(|e| AgentError::ResponseParse {
                message: format!("Exa search response: {e}"),
            })
    }
}
