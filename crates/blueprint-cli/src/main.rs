//! Blueprint CLI Application
//!
//! Plans, designs and writes a small project from a one-line request.

mod args;
mod progress;
mod renderer;

use std::env;

use anyhow::{Context, Result};
use args::Args;
use blueprint_core::{config, AgentBuilder, ChatCompletionsClient, ModelConfig};
use clap::Parser;
use log::{info, LevelFilter};
use progress::ConsoleObserver;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    let debug = config::debug_enabled();
    init_logging(debug);

    let args = Args::parse();
    let prompt = args.prompt();

    let model_config = ModelConfig::from_env().context("Failed to configure model client")?;
    info!("Using model {} at {}", model_config.model, model_config.base_url);

    let agent = AgentBuilder::new()
        .with_project_root(&args.project_root)
        .with_model(ChatCompletionsClient::new(model_config))
        .with_observer(ConsoleObserver)
        .with_debug(debug)
        .build()
        .with_context(|| {
            format!(
                "Failed to open project root {}",
                args.project_root.display()
            )
        })?;

    info!("Blueprint started in {}", agent.sandbox().root().display());

    let state = agent.run(prompt).await.context("Run failed")?;

    TerminalRenderer::new(!args.no_color).render(&state.to_string());
    Ok(())
}

/// Debug mode raises the default filter unless `RUST_LOG` says otherwise.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug && env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}
