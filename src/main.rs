//! Research Assistant - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the assistants.

use research_assistant::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "research_assistant=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={}, max_tool_rounds={}, save_reports={}",
        config.llm.model, config.max_tool_rounds, config.save_reports
    );

    api::serve(config).await?;

    Ok(())
}
