//! contentflow - pipeline demo entry point.
//!
//! Runs the research → writer → image workflow for a topic given as the
//! first CLI argument and writes the assembled document to the working
//! directory. Starts in simulation mode; set `CONTENTFLOW_REAL_MODE=1` with
//! a valid `OPENAI_API_KEY` to use real models.

use std::path::Path;
use std::sync::Arc;

use contentflow::config::{env_flag, PipelineConfig, Provider};
use contentflow::llm::OpenAiClient;
use contentflow::pipeline::{self, Orchestrator};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_TOPIC: &str = "The Future of Collaborative AI";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contentflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = PipelineConfig::from_env();
    if config.has_valid_credential(Provider::OpenAi) {
        if env_flag("CONTENTFLOW_REAL_MODE") {
            config.enable_real_mode(Provider::OpenAi)?;
            info!("real mode enabled for provider 'openai'");
        } else {
            info!("OpenAI API key detected; set CONTENTFLOW_REAL_MODE=1 to use real models");
        }
    } else {
        info!("no AI API keys found; using enhanced simulation mode");
    }

    let api_key = config
        .credential(Provider::OpenAi)
        .unwrap_or_default()
        .to_string();
    let orchestrator = Orchestrator::new(config, Arc::new(OpenAiClient::new(api_key)));

    let topic = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_TOPIC.to_string());
    let document = orchestrator.run(&topic).await?;

    let path = pipeline::write_document(&document, Path::new("."))?;
    info!("output saved to {}", path.display());
    Ok(())
}
