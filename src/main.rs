//! Process bootstrap for the deep research agent server.
//!
//! Parses CLI flags (with environment fallbacks), exports overrides back
//! into the process environment so the lazy initializer sees them, loads
//! the service configuration, and runs the hosting layer.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deep_research_agent::config::ServiceConfig;
use deep_research_agent::handler::ResearchHandler;
use deep_research_agent::server;

/// Deep research agent with web research tools and citation tracking.
#[derive(Parser, Debug)]
#[command(name = "deep-research-agent", version, about)]
struct Cli {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    openrouter_api_key: Option<String>,

    /// Exa API key for web research
    #[arg(long, env = "EXA_API_KEY", hide_env_values = true)]
    exa_api_key: Option<String>,

    /// Model ID for OpenRouter
    #[arg(long, env = "MODEL_NAME")]
    model: Option<String>,

    /// Path to agent_config.json
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Exports supplied credentials into the process environment.
    ///
    /// The initializer reads credentials from the environment at
    /// initialization time, so CLI overrides must land there. Called
    /// before the async runtime starts, while the process is still
    /// single-threaded.
    #[allow(unsafe_code)]
    fn export_to_env(&self) {
        let vars = [
            ("OPENAI_API_KEY", &self.openai_api_key),
            ("OPENROUTER_API_KEY", &self.openrouter_api_key),
            ("EXA_API_KEY", &self.exa_api_key),
            ("MODEL_NAME", &self.model),
        ];
        for (key, value) in vars {
            if let Some(value) = value {
                // Safety: no other threads exist yet.
                unsafe { std::env::set_var(key, value) };
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.export_to_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli.config.as_deref()))
}

async fn run(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = ServiceConfig::load(config_path)?;
    info!(
        name = %config.name,
        version = %config.version,
        url = %config.deployment.url,
        "starting deep research agent server"
    );

    let handler = Arc::new(ResearchHandler::from_env());
    server::serve(config, handler).await
}
