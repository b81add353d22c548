use anyhow::{Context, Result};
use clap::Parser;
use greenroom::{create_router, AppState, Config};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "greenroom", about = "Interview practice session service")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/greenroom")]
    config: String,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    let port = args.port.unwrap_or(cfg.service.http.port);
    let addr = format!("{}:{}", cfg.service.http.bind, port);

    info!("{} v0.1.0", cfg.service.name);
    info!(
        "Providers: nats_enabled={} ({})",
        cfg.providers.nats_enabled, cfg.providers.nats_url
    );

    let state = AppState::new(Arc::new(cfg));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
