//! HTTP hosting layer.
//!
//! Exposes the dispatch entry point over HTTP: one message route invoking
//! [`ResearchHandler::handle`] per request, plus a health probe carrying
//! the gate's ready flag. Deployment settings (bind URL, CORS origins)
//! come from [`ServiceConfig`] and are applied, not interpreted.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::agent::message::ChatMessage;
use crate::config::ServiceConfig;
use crate::error::AgentError;
use crate::handler::ResearchHandler;

/// Default port when the deployment URL omits one.
const DEFAULT_PORT: u16 = 3773;

/// Shared request state.
#[derive(Debug)]
struct AppState {
    handler: Arc<ResearchHandler>,
    config: ServiceConfig,
}

/// JSON error body returned to callers.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Health probe response.
#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    ready: bool,
    name: String,
    version: String,
}

/// Runs the server until shutdown, then invokes the cleanup hook.
///
/// # Errors
///
/// Returns an error when the deployment URL is unparseable or the
/// listener cannot bind.
pub async fn serve(config: ServiceConfig, handler: Arc<ResearchHandler>) -> anyhow::Result<()> {
    let addr = bind_address(&config.deployment.url)?;
    let app = build_router(Arc::new(AppState {
        handler: handler.clone(),
        config,
    }));

    info!(%addr, "deep research agent server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    handler.cleanup().await;
    Ok(())
}

/// Resolves the socket address from the configured deployment URL.
fn bind_address(url: &str) -> anyhow::Result<SocketAddr> {
    use std::net::ToSocketAddrs;

    let parsed = url::Url::parse(url)?;
    let host = parsed.host_str().unwrap_or("127.0.0.1");
    let port = parsed.port().unwrap_or(DEFAULT_PORT);
    (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| anyhow::anyhow!("cannot resolve bind host: {host}"))
}

/// Waits for ctrl-c.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install ctrl-c handler");
    }
    info!("shutdown signal received");
}

/// Builds the application router with CORS and tracing layers.
fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.deployment.cors_origins);

    Router::new()
        .route("/v1/messages", post(handle_messages))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Builds the CORS layer from configured origins (`"*"` allows any).
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%origin, error = %e, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// `POST /v1/messages` — dispatch a message sequence to the agent.
async fn handle_messages(
    State(state): State<Arc<AppState>>,
    Json(messages): Json<Vec<ChatMessage>>,
) -> Response {
    match state.handler.handle(&messages).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `GET /health` — liveness plus the initialization gate's ready flag.
async fn health(State(state): State<Arc<AppState>>) -> Response {
    Json(HealthBody {
        status: "ok",
        ready: state.handler.ready(),
        name: state.config.name.clone(),
        version: state.config.version.clone(),
    })
    .into_response()
}

/// Maps the error taxonomy to HTTP status codes so callers can tell
/// "could not initialize" (503) from "downstream call failed" (502).
fn error_response(error: &AgentError) -> Response {
    let status = match error {
        AgentError::SearchKeyMissing | AgentError::ModelKeyMissing | AgentError::Config { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        AgentError::ApiRequest { .. } => StatusCode::BAD_GATEWAY,
        AgentError::NotInitialized
        | AgentError::ToolExecution { .. }
        | AgentError::ToolLoopExceeded { .. }
        | AgentError::ResponseParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
        .into_response()
}
