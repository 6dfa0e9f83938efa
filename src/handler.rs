//! Lazy single-flight initialization gate and message dispatcher.
//!
//! The hosting layer invokes [`ResearchHandler::handle`] once per incoming
//! request. The first call constructs the agent through the factory; every
//! later call reuses the same instance. At most one construction attempt
//! is in flight at any time, construction failures are never cached, and
//! a successful construction is sticky for the process lifetime.
//!
//! The gate is a [`tokio::sync::OnceCell`]: late arrivals await the
//! in-flight attempt instead of racing on a ready flag, and the cell stays
//! empty after a failed attempt so the next caller retries from scratch
//! with freshly-read credentials.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::OnceCell;
use tracing::info;

use crate::agent::credentials::Credentials;
use crate::agent::factory::build_agent;
use crate::agent::message::ChatMessage;
use crate::agent::research::{ResearchAgent, RunResponse};
use crate::error::AgentError;

/// Factory invoked (at most once concurrently) to construct the agent.
///
/// Injected so tests can count constructions and substitute mock
/// providers; production uses [`ResearchHandler::from_env`].
pub type AgentFactory =
    Arc<dyn Fn() -> BoxFuture<'static, Result<ResearchAgent, AgentError>> + Send + Sync>;

/// Process-wide agent state plus the initialization gate.
///
/// Owned by the hosting process and passed by reference into request
/// handling; there are no module-level globals.
pub struct ResearchHandler {
    agent: OnceCell<Arc<ResearchAgent>>,
    factory: AgentFactory,
}

impl std::fmt::Debug for ResearchHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchHandler")
            .field("ready", &self.ready())
            .finish_non_exhaustive()
    }
}

impl ResearchHandler {
    /// Creates a handler whose factory reads credentials from the process
    /// environment at initialization time (not at handler creation).
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_factory(Arc::new(|| {
            Box::pin(async { build_agent(&Credentials::from_env()) })
        }))
    }

    /// Creates a handler with an injected agent factory.
    #[must_use]
    pub fn with_factory(factory: AgentFactory) -> Self {
        Self {
            agent: OnceCell::new(),
            factory,
        }
    }

    /// Handles one message sequence: initializes the agent if needed,
    /// then forwards the messages and returns the agent's response
    /// unmodified.
    ///
    /// # Errors
    ///
    /// Propagates the factory's configuration errors when initialization
    /// fails, and the agent's downstream errors when the run fails.
    pub async fn handle(&self, messages: &[ChatMessage]) -> Result<RunResponse, AgentError> {
        let agent = self
            .agent
            .get_or_try_init(|| async {
                info!("initializing deep research agent");
                (self.factory)().await.map(Arc::new)
            })
            .await?
            .clone();

        // The gate is released; the run happens outside any lock.
        agent.run(messages).await
    }

    /// Whether initialization has completed successfully.
    #[must_use]
    pub fn ready(&self) -> bool {
        self.agent.initialized()
    }

    /// Returns the constructed agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotInitialized`] when no agent has been
    /// constructed yet.
    pub fn current(&self) -> Result<&Arc<ResearchAgent>, AgentError> {
        self.agent.get().ok_or(AgentError::NotInitialized)
    }

    /// Teardown hook invoked by the hosting layer at shutdown.
    ///
    /// No handles are held outside the process-wide state, so there is
    /// nothing to release.
    pub async fn cleanup(&self) {
        info!("cleaning up deep research agent resources");
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::agent::message::{ChatRequest, ChatResponse, TokenUsage, user_message};
    use crate::agent::provider::LlmProvider;
    use crate::agent::tools::exa::ExaClient;
    use crate::agent::tools::reasoning::ReasoningToolkit;

    /// Provider that answers every request with a fixed string.
    struct StubProvider;

    #[async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            Ok(ChatResponse {
                content: "stub report".to_string(),
                usage: TokenUsage::default(),
                tool_calls: Vec::new(),
                finish_reason: Some("stop".to_string()),
            })
        }
    }

    fn stub_agent() -> ResearchAgent {
        ResearchAgent::new(
            Arc::new(StubProvider),
            "stub-model".to_string(),
            ExaClient::new("test-key"),
            ReasoningToolkit::new(true),
        )
    }

    /// Factory that counts constructions and fails the first `fail_first`
    /// attempts with a configuration error.
    fn counting_factory(
        constructions: Arc<AtomicUsize>,
        fail_first: usize,
    ) -> AgentFactory {
        Arc::new(move || {
            let constructions = constructions.clone();
            Box::pin(async move {
                // Widen the race window so concurrent callers pile up.
                tokio::time::sleep(Duration::from_millis(10)).await;
                let attempt = constructions.fetch_add(1, Ordering::SeqCst);
                if attempt < fail_first {
                    Err(AgentError::SearchKeyMissing)
                } else {
                    Ok(stub_agent())
                }
            })
        })
    }

    #[tokio::test]
    async fn test_concurrent_calls_initialize_exactly_once() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(ResearchHandler::with_factory(counting_factory(
            constructions.clone(),
            0,
        )));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let handler = handler.clone();
                tokio::spawn(async move { handler.handle(&[user_message("hi")]).await })
            })
            .collect();

        for task in tasks {
            let response = task
                .await
                .unwrap_or_else(|e| panic!("join failed: {e}"))
                .unwrap_or_else(|e| panic!("handle failed: {e}"));
            assert_eq!(response.content, "stub report");
        }

        assert_eq!(constructions.load(Ordering::SeqCst), 1);
        assert!(handler.ready());
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let handler =
            ResearchHandler::with_factory(counting_factory(constructions.clone(), 1));

        let first = handler.handle(&[user_message("hi")]).await;
        assert!(matches!(first, Err(AgentError::SearchKeyMissing)));
        assert!(!handler.ready());

        // The next call retries construction from scratch.
        let second = handler.handle(&[user_message("hi")]).await;
        assert!(second.is_ok());
        assert_eq!(constructions.load(Ordering::SeqCst), 2);
        assert!(handler.ready());
    }

    #[tokio::test]
    async fn test_ready_is_sticky() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let handler =
            ResearchHandler::with_factory(counting_factory(constructions.clone(), 0));

        for _ in 0..5 {
            handler
                .handle(&[user_message("hi")])
                .await
                .unwrap_or_else(|e| panic!("handle failed: {e}"));
        }

        // One construction regardless of how many dispatches followed.
        assert_eq!(constructions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_current_before_and_after_initialization() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let handler = ResearchHandler::with_factory(counting_factory(constructions, 0));

        assert!(matches!(
            handler.current(),
            Err(AgentError::NotInitialized)
        ));

        handler
            .handle(&[user_message("hi")])
            .await
            .unwrap_or_else(|e| panic!("handle failed: {e}"));

        let agent = handler.current().unwrap_or_else(|_| unreachable!());
        assert_eq!(agent.model(), "stub-model");
    }

    #[tokio::test]
    async fn test_response_fields_are_preserved() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let handler = ResearchHandler::with_factory(counting_factory(constructions, 0));

        let response = handler
            .handle(&[user_message("Hello")])
            .await
            .unwrap_or_else(|e| panic!("handle failed: {e}"));

        assert_eq!(response.content, "stub report");
        assert_eq!(response.model, "stub-model");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert!(!response.run_id.is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_is_a_noop() {
        let handler = ResearchHandler::from_env();
        // Must not panic or block regardless of initialization state.
        handler.cleanup().await;
    }
}
