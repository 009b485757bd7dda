use std::sync::Arc;

use anyhow::Context;
use blaster_gateway::cli::Cli;
use blaster_gateway::telemetry::init_tracing;
use blaster_gateway::{App, AppState};
use blaster_generator::HashGenerator;
use blaster_shortener::ShortenerService;
use blaster_storage::{RedisStore, RedisStoreSettings};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        redis_url = %config.redis_url(),
        expiration = ?config.expiration(),
        "starting url blaster"
    );

    let settings = RedisStoreSettings::builder()
        .url(config.redis_url())
        .expiration(config.expiration())
        .command_timeout(config.command_timeout())
        .build();
    let store = RedisStore::connect(settings)
        .await
        .context("failed to initialise redis store")?;

    let service = ShortenerService::new(HashGenerator::new(), store);
    let state = AppState::new(Arc::new(service), config.public_base_url.clone());

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "serving http");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("url blaster stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
