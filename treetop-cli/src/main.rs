//! # Treetop CLI
//!
//! Replays an input-event script and writes the drawing to disk.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use treetop_cli::{CliArgs, CliConfig};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "treetop_cli=info,treetop_core=info,treetop_renderer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Treetop v{}", treetop_core::VERSION);

    // Parse CLI arguments
    let args = CliArgs::parse();
    let config = CliConfig::from(args);

    tracing::info!(
        "Canvas {} (max {}), {} outputs",
        config.canvas.size,
        config.canvas.max_size,
        config.outputs.len()
    );
    if config.outputs.is_empty() {
        tracing::warn!("No output requested; pass --svg, --surface-svg or --txt to save the drawing");
    }

    let summary = treetop_cli::run(&config)?;
    for path in &summary.written {
        println!("{}", path.display());
    }

    tracing::info!("Treetop exited");
    Ok(())
}
